use crate::app::config::ToolConfig;
use crate::ports::RepositoryFilesystem;

/// Application context holding dependencies for command execution.
pub struct AppContext<R: RepositoryFilesystem> {
    repo: R,
    config: ToolConfig,
    manifest_override: Option<String>,
}

impl<R: RepositoryFilesystem> AppContext<R> {
    /// Create a new application context.
    pub fn new(repo: R, config: ToolConfig, manifest_override: Option<String>) -> Self {
        Self { repo, config, manifest_override }
    }

    /// Get a reference to the repository filesystem.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Manifest path given on the command line, bypassing discovery.
    pub fn manifest_override(&self) -> Option<&str> {
        self.manifest_override.as_deref()
    }
}
