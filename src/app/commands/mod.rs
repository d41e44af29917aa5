pub mod check;
pub mod fmt;
pub mod init;
pub mod install;
pub mod plan;
pub mod rank;

use tracing::debug;

use crate::app::AppContext;
use crate::domain::manifest::{ManifestLocation, locate_manifest, parse_manifest_content};
use crate::domain::{AppError, Manifest};
use crate::ports::RepositoryFilesystem;

/// A manifest read from the repository together with its raw text.
pub(crate) struct LoadedManifest {
    pub location: ManifestLocation,
    pub content: String,
    pub manifest: Manifest,
}

pub(crate) fn load_manifest<R: RepositoryFilesystem>(
    ctx: &AppContext<R>,
) -> Result<LoadedManifest, AppError> {
    let location = locate_manifest(ctx.repo(), ctx.manifest_override())?;
    let content = ctx.repo().read_file(&location.path)?;
    let manifest = parse_manifest_content(&location.path, &content)?;
    debug!(manifest = %location.path, steps = manifest.install_steps().len(), "manifest loaded");

    Ok(LoadedManifest { location, content, manifest })
}
