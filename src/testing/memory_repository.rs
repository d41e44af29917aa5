use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::adapters::filesystem::normalize_path;
use crate::domain::AppError;
use crate::ports::RepositoryFilesystem;

const ROOT: &str = "/repo";

/// In-memory repository for tests that only need existence checks and small files.
#[derive(Debug)]
pub struct MemoryRepository {
    root: PathBuf,
    files: Mutex<BTreeMap<String, String>>,
    dirs: BTreeSet<String>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(ROOT),
            files: Mutex::new(BTreeMap::new()),
            dirs: BTreeSet::from([String::new()]),
        }
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        let key = self.key(path);
        self.add_parents(&key);
        self.dirs.insert(key);
        self
    }

    pub fn with_file(self, path: &str) -> Self {
        self.with_file_content(path, "")
    }

    pub fn with_file_content(mut self, path: &str, content: &str) -> Self {
        let key = self.key(path);
        self.add_parents(&key);
        self.files.get_mut().unwrap().insert(key, content.to_string());
        self
    }

    fn key(&self, path: &str) -> String {
        let normalized = normalize_path(&self.root.join(path));
        normalized
            .strip_prefix(&self.root)
            .map(|rel| rel.to_string_lossy().into_owned())
            .unwrap_or_else(|_| normalized.to_string_lossy().into_owned())
    }

    fn add_parents(&mut self, key: &str) {
        let mut parent = Path::new(key).parent();
        while let Some(dir) = parent {
            self.dirs.insert(dir.to_string_lossy().into_owned());
            parent = dir.parent();
        }
    }
}

impl RepositoryFilesystem for MemoryRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &str) -> Result<String, AppError> {
        self.ensure_within_root(path)?;
        self.files.lock().unwrap().get(&self.key(path)).cloned().ok_or_else(|| {
            AppError::Io(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path)))
        })
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), AppError> {
        self.ensure_within_root(path)?;
        self.files.lock().unwrap().insert(self.key(path), content.to_string());
        Ok(())
    }

    fn file_exists(&self, path: &str) -> bool {
        if self.ensure_within_root(path).is_err() {
            return false;
        }
        let key = self.key(path);
        self.dirs.contains(&key) || self.files.lock().unwrap().contains_key(&key)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.ensure_within_root(path).is_ok() && self.dirs.contains(&self.key(path))
    }

    fn ensure_within_root(&self, path: &str) -> Result<(), AppError> {
        if normalize_path(&self.root.join(path)).starts_with(&self.root) {
            Ok(())
        } else {
            Err(AppError::PathTraversal(path.to_string()))
        }
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_imply_parents_and_ignore_trailing_slash() {
        let repo = MemoryRepository::new().with_dir("a/b/");

        assert!(repo.is_dir("a"));
        assert!(repo.is_dir("a/b"));
        assert!(repo.file_exists("a/b/"));
        assert!(repo.file_exists("."));
        assert!(!repo.file_exists("c"));
    }

    #[test]
    fn traversal_is_rejected() {
        let repo = MemoryRepository::new();
        assert!(repo.ensure_within_root("../x").is_err());
        assert!(!repo.file_exists("../x"));
    }
}
