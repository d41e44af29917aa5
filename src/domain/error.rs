use std::io;

use thiserror::Error;

/// Library-wide error type for docbuild operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// No manifest candidate exists at the repository root.
    #[error("No documentation manifest found in {root} (looked for {candidates})")]
    ManifestNotFound { root: String, candidates: String },

    /// A manifest already exists where `init` would write one.
    #[error("Manifest already exists: {0} (use --force to overwrite)")]
    ManifestExists(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Manifest declares a schema version this tool does not understand.
    #[error("Unsupported manifest version {found}: expected {expected}")]
    UnsupportedVersion { found: u64, expected: u64 },

    /// A path referenced by the manifest does not exist.
    #[error("Missing path for {field}: {path}")]
    MissingPath { field: String, path: String },

    /// A path resolves outside the repository root.
    #[error("Path escapes repository root: {0}")]
    PathTraversal(String),

    /// A search glob could not be compiled.
    #[error("Invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// External command could not be started.
    #[error("Failed to start '{command}': {details}")]
    CommandSpawn { command: String, details: String },

    /// External install command exited unsuccessfully.
    #[error("Install step {index} failed: `{command}` exited with {status}")]
    StepFailed { index: usize, command: String, status: String },

    /// Starter template could not be rendered.
    #[error("Template rendering failed: {0}")]
    Template(String),

    /// Generic validation failure.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error(what: impl Into<String>, details: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers that only care about the category.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_)
            | AppError::UnsupportedVersion { .. }
            | AppError::PathTraversal(_)
            | AppError::InvalidPattern { .. }
            | AppError::Validation(_) => io::ErrorKind::InvalidInput,
            AppError::ManifestNotFound { .. } | AppError::MissingPath { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::ManifestExists(_) => io::ErrorKind::AlreadyExists,
            AppError::CommandSpawn { .. } | AppError::StepFailed { .. } | AppError::Template(_) => {
                io::ErrorKind::Other
            }
        }
    }
}
