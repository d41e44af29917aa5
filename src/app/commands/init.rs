//! Init command: write a starter manifest.

use tracing::info;

use crate::adapters::assets::{ManifestTemplate, StarterOptions};
use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::manifest::{MANIFEST_CANDIDATES, parse_manifest_content};
use crate::domain::manifest::vocabulary::{OS_IMAGES, is_supported_os, tool_versions};
use crate::ports::RepositoryFilesystem;

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub starter: StarterOptions,
    /// Overwrite an existing manifest.
    pub force: bool,
}

/// Returns the root-relative path written.
pub fn execute<R: RepositoryFilesystem>(
    ctx: &AppContext<R>,
    options: InitOptions,
) -> Result<String, AppError> {
    validate_starter(&options.starter)?;

    let target = ctx.manifest_override().unwrap_or(MANIFEST_CANDIDATES[0]).to_string();
    ctx.repo().ensure_within_root(&target)?;

    if !options.force {
        let existing = std::iter::once(target.as_str())
            .chain(MANIFEST_CANDIDATES.iter().copied())
            .find(|candidate| ctx.repo().file_exists(candidate));
        if let Some(existing) = existing {
            return Err(AppError::ManifestExists(existing.to_string()));
        }
    }

    let content = ManifestTemplate::render(&options.starter)?;
    parse_manifest_content(&target, &content)?;
    ctx.repo().write_file(&target, &content)?;
    info!(manifest = %target, "starter manifest written");

    Ok(target)
}

fn validate_starter(starter: &StarterOptions) -> Result<(), AppError> {
    if !is_supported_os(&starter.os) {
        return Err(AppError::Validation(format!(
            "Unsupported build image '{}': expected one of {}",
            starter.os,
            OS_IMAGES.join(", ")
        )));
    }

    let versions = tool_versions("python").unwrap_or_default();
    if !versions.contains(&starter.python.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported python version '{}': expected one of {}",
            starter.python,
            versions.join(", ")
        )));
    }
    Ok(())
}
