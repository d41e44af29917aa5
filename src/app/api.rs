//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution. Every function takes the repository root and an
//! optional manifest path that bypasses discovery.

use std::path::PathBuf;

use crate::adapters::{FilesystemStore, ProcessCommandRunner};
use crate::app::AppContext;
use crate::app::commands::{check, fmt, init, install, plan, rank};
use crate::app::config::load_config;

pub use crate::adapters::assets::StarterOptions;
pub use crate::app::commands::check::{CheckOptions, CheckOutcome};
pub use crate::app::commands::fmt::{FmtOptions, FmtOutcome};
pub use crate::app::commands::init::InitOptions;
pub use crate::app::commands::install::{InstallOptions, InstallReport};
pub use crate::app::commands::rank::PageRanking;
pub use crate::domain::{AppError, InstallPlan, PageRank, PlannedStep};

/// Create an `AppContext` for a given repository root.
fn create_context(
    root: PathBuf,
    manifest: Option<&str>,
) -> Result<AppContext<FilesystemStore>, AppError> {
    let repo = FilesystemStore::new(root);
    let config = load_config(&repo)?;
    Ok(AppContext::new(repo, config, manifest.map(str::to_string)))
}

/// Validate the manifest and print diagnostics.
pub fn check(
    root: impl Into<PathBuf>,
    manifest: Option<&str>,
    options: CheckOptions,
) -> Result<CheckOutcome, AppError> {
    let ctx = create_context(root.into(), manifest)?;
    check::execute(&ctx, options)
}

/// Derive the install plan without running anything.
pub fn plan(root: impl Into<PathBuf>, manifest: Option<&str>) -> Result<InstallPlan, AppError> {
    let ctx = create_context(root.into(), manifest)?;
    plan::execute(&ctx)
}

/// Run the install plan with the system interpreter.
pub fn install(
    root: impl Into<PathBuf>,
    manifest: Option<&str>,
    options: InstallOptions,
    on_step: impl FnMut(&PlannedStep, usize),
) -> Result<InstallReport, AppError> {
    let ctx = create_context(root.into(), manifest)?;
    install::execute(&ctx, &ProcessCommandRunner, options, on_step)
}

/// Produce (and optionally write) the canonical manifest.
pub fn fmt(
    root: impl Into<PathBuf>,
    manifest: Option<&str>,
    options: FmtOptions,
) -> Result<FmtOutcome, AppError> {
    let ctx = create_context(root.into(), manifest)?;
    fmt::execute(&ctx, options)
}

/// Resolve search ranking for each page path.
pub fn rank(
    root: impl Into<PathBuf>,
    manifest: Option<&str>,
    pages: &[String],
) -> Result<Vec<PageRanking>, AppError> {
    let ctx = create_context(root.into(), manifest)?;
    rank::execute(&ctx, pages)
}

/// Write a starter manifest; returns the path written.
pub fn init(
    root: impl Into<PathBuf>,
    manifest: Option<&str>,
    options: InitOptions,
) -> Result<String, AppError> {
    let ctx = create_context(root.into(), manifest)?;
    init::execute(&ctx, options)
}
