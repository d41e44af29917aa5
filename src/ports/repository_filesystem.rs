//! Repository-level filesystem operations.
//!
//! Every path the manifest mentions is relative to the repository root,
//! so this port speaks only in root-relative paths.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Port for filesystem access scoped to a repository root.
///
/// All `path` arguments are relative to the repository root.
/// Implementations must reject paths that escape the root boundary.
pub trait RepositoryFilesystem {
    /// The repository root.
    fn root(&self) -> &Path;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &str) -> Result<String, AppError>;

    /// Write UTF-8 content to a file, creating parent directories as needed.
    fn write_file(&self, path: &str, content: &str) -> Result<(), AppError>;

    /// Check whether a file or directory exists.
    fn file_exists(&self, path: &str) -> bool;

    /// Check whether a path is a directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Fail with `AppError::PathTraversal` when `path` resolves outside the root.
    fn ensure_within_root(&self, path: &str) -> Result<(), AppError>;

    /// Resolve a relative path to an absolute path within the repository root.
    fn resolve_path(&self, path: &str) -> PathBuf;
}
