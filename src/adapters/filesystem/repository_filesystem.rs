//! `RepositoryFilesystem` implementation for `FilesystemStore`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::RepositoryFilesystem;

use super::FilesystemStore;

impl RepositoryFilesystem for FilesystemStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &str) -> Result<String, AppError> {
        self.validate_path_within_root(Path::new(path))?;
        let full_path = self.resolve_path(path);
        fs::read_to_string(full_path).map_err(AppError::from)
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), AppError> {
        self.validate_path_within_root(Path::new(path))?;
        let full_path = self.resolve_path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full_path, content).map_err(AppError::from)
    }

    fn file_exists(&self, path: &str) -> bool {
        if self.validate_path_within_root(Path::new(path)).is_err() {
            return false;
        }
        let full_path = self.resolve_path(path);
        full_path.exists()
    }

    fn is_dir(&self, path: &str) -> bool {
        if self.validate_path_within_root(Path::new(path)).is_err() {
            return false;
        }
        let full_path = self.resolve_path(path);
        full_path.is_dir()
    }

    fn ensure_within_root(&self, path: &str) -> Result<(), AppError> {
        self.validate_path_within_root(Path::new(path))
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}
