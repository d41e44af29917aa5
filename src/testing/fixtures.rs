use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::adapters::FilesystemStore;

pub const RASTERVISION_PACKAGES: &[&str] = &[
    "rastervision_pipeline",
    "rastervision_aws_s3",
    "rastervision_aws_batch",
    "rastervision_core",
    "rastervision_pytorch_learner",
    "rastervision_pytorch_backend",
];

pub const RASTERVISION_MANIFEST: &str = r#"
version: 2

build:
  os: ubuntu-22.04
  tools:
    python: "3.9"

sphinx:
  configuration: docs/conf.py

formats:
  - pdf

python:
  install:
    - requirements: docs/requirements.txt
    - method: pip
      path: rastervision_pipeline/
    - method: pip
      path: rastervision_aws_s3/
    - method: pip
      path: rastervision_aws_batch/
    - method: pip
      path: rastervision_core/
    - method: pip
      path: rastervision_pytorch_learner/
    - method: pip
      path: rastervision_pytorch_backend/

search:
  ranking:
    api_reference/*: -3
    usage/*: 5
"#;

/// A throwaway repository on disk.
pub struct RepoFixture {
    dir: TempDir,
}

impl RepoFixture {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().expect("failed to create temp dir") }
    }

    /// Docs sources plus every package directory the sample manifest installs.
    pub fn rastervision() -> Self {
        let fixture = Self::empty();
        fixture.write(".readthedocs.yml", RASTERVISION_MANIFEST);
        fixture.write("docs/conf.py", "project = 'Raster Vision'\n");
        fixture.write("docs/requirements.txt", "sphinx\n");
        for package in RASTERVISION_PACKAGES {
            fixture.write(&format!("{}/setup.py", package), "from setuptools import setup\n");
        }
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(path, content).expect("failed to write fixture file");
    }

    pub fn remove(&self, relative: &str) {
        let path = self.dir.path().join(relative);
        if path.is_dir() {
            fs::remove_dir_all(path).expect("failed to remove fixture directory");
        } else {
            fs::remove_file(path).expect("failed to remove fixture file");
        }
    }

    pub fn store(&self) -> FilesystemStore {
        FilesystemStore::new(self.dir.path().to_path_buf())
    }
}
