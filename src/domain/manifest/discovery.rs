//! Locating the manifest file at the repository root.

use tracing::debug;

use crate::domain::AppError;
use crate::ports::RepositoryFilesystem;

/// File names the hosting service accepts, in lookup order.
pub const MANIFEST_CANDIDATES: &[&str] =
    &[".readthedocs.yaml", ".readthedocs.yml", "readthedocs.yaml", "readthedocs.yml"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    /// Root-relative path of the manifest in use.
    pub path: String,
    /// Other candidates present at the root that lose to `path`.
    pub shadowed: Vec<String>,
}

/// Find the manifest, honoring an explicit override first.
pub fn locate_manifest<R: RepositoryFilesystem + ?Sized>(
    repo: &R,
    explicit: Option<&str>,
) -> Result<ManifestLocation, AppError> {
    if let Some(path) = explicit {
        repo.ensure_within_root(path)?;
        if !repo.file_exists(path) || repo.is_dir(path) {
            return Err(AppError::MissingPath { field: "--manifest".into(), path: path.into() });
        }
        return Ok(ManifestLocation { path: path.to_string(), shadowed: Vec::new() });
    }

    let mut present = MANIFEST_CANDIDATES
        .iter()
        .filter(|candidate| repo.file_exists(candidate) && !repo.is_dir(candidate))
        .map(|candidate| candidate.to_string());

    let Some(path) = present.next() else {
        return Err(AppError::ManifestNotFound {
            root: repo.root().display().to_string(),
            candidates: MANIFEST_CANDIDATES.join(", "),
        });
    };
    let shadowed: Vec<String> = present.collect();

    debug!(manifest = %path, shadowed = ?shadowed, "located manifest");
    Ok(ManifestLocation { path, shadowed })
}
