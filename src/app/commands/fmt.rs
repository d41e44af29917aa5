//! Rewrite the manifest in canonical form.
//!
//! Comments and key order are not preserved; the canonical form follows the
//! model's field order and omits defaults.

use tracing::info;

use crate::app::AppContext;
use crate::app::commands::load_manifest;
use crate::domain::AppError;
use crate::domain::manifest::{parse_manifest_content, to_canonical_yaml};
use crate::ports::RepositoryFilesystem;

#[derive(Debug, Clone, Default)]
pub struct FmtOptions {
    /// Replace the manifest on disk instead of only returning the text.
    pub write: bool,
}

#[derive(Debug, Clone)]
pub struct FmtOutcome {
    pub manifest: String,
    pub formatted: String,
    /// Whether the canonical text differs from the file.
    pub changed: bool,
    pub written: bool,
}

pub fn execute<R: RepositoryFilesystem>(
    ctx: &AppContext<R>,
    options: FmtOptions,
) -> Result<FmtOutcome, AppError> {
    let loaded = load_manifest(ctx)?;
    let formatted = to_canonical_yaml(&loaded.manifest)?;

    let reparsed = parse_manifest_content(&loaded.location.path, &formatted)?;
    if reparsed != loaded.manifest {
        return Err(AppError::Validation(format!(
            "canonical form of {} does not reproduce the manifest",
            loaded.location.path
        )));
    }

    let changed = formatted != loaded.content;
    let written = options.write && changed;
    if written {
        ctx.repo().write_file(&loaded.location.path, &formatted)?;
        info!(manifest = %loaded.location.path, "manifest rewritten");
    }

    Ok(FmtOutcome { manifest: loaded.location.path, formatted, changed, written })
}
