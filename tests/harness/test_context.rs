//! Shared testing harness for `docbuild` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const PACKAGES: &[&str] = &[
    "rastervision_pipeline",
    "rastervision_aws_s3",
    "rastervision_aws_batch",
    "rastervision_core",
    "rastervision_pytorch_learner",
    "rastervision_pytorch_backend",
];

pub(crate) const MANIFEST: &str = r#"version: 2

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
"#;

/// Testing harness providing an isolated repository for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated, empty repository.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("repo");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// A repository laid out like the raster vision monorepo, manifest included.
    pub(crate) fn rastervision() -> Self {
        let ctx = Self::new();
        ctx.write(".readthedocs.yml", MANIFEST);
        ctx.write("docs/conf.py", "project = 'Raster Vision'\n");
        ctx.write("docs/requirements.txt", "sphinx\n");
        for package in PACKAGES {
            ctx.write(&format!("{}/setup.py", package), "from setuptools import setup\n");
        }
        ctx
    }

    /// Scratch directory outside the repository.
    pub(crate) fn scratch(&self) -> &Path {
        self.root.path()
    }

    /// Path to the repository used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `docbuild` binary within the repository.
    pub(crate) fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `docbuild` binary within a custom directory.
    pub(crate) fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("docbuild").expect("Failed to locate docbuild binary");
        cmd.current_dir(dir.as_ref()).env_remove("DOCBUILD_PYTHON").env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the repository root.
    pub(crate) fn write(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    /// Read a file relative to the repository root.
    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read test file")
    }

    /// Remove a file or directory relative to the repository root.
    pub(crate) fn remove(&self, relative: &str) {
        let path = self.work_dir.join(relative);
        if path.is_dir() {
            fs::remove_dir_all(path).expect("Failed to remove test directory");
        } else {
            fs::remove_file(path).expect("Failed to remove test file");
        }
    }

    pub(crate) fn exists(&self, relative: &str) -> bool {
        self.work_dir.join(relative).exists()
    }
}
