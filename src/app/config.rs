//! Tool configuration loaded from `docbuild.toml` at the repository root.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{AppError, PlanSettings};
use crate::ports::RepositoryFilesystem;

pub const CONFIG_FILE: &str = "docbuild.toml";

/// Environment variable that replaces `install.python`.
pub const PYTHON_ENV_VAR: &str = "DOCBUILD_PYTHON";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    /// Interpreter used for every install step.
    #[serde(default = "default_python")]
    pub python: String,
    /// Appended to every pip invocation.
    #[serde(default)]
    pub extra_pip_args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self { python: default_python(), extra_pip_args: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Treat warnings as failures.
    #[serde(default)]
    pub strict: bool,
}

fn default_python() -> String {
    "python".to_string()
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.install.python.trim().is_empty() {
            return Err(AppError::config_error("install.python must not be empty"));
        }
        if self.install.extra_pip_args.iter().any(|arg| arg.trim().is_empty()) {
            return Err(AppError::config_error(
                "install.extra_pip_args must not contain empty entries",
            ));
        }
        Ok(())
    }

    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings {
            python: self.install.python.clone(),
            extra_pip_args: self.install.extra_pip_args.clone(),
        }
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(python) = lookup(PYTHON_ENV_VAR).filter(|value| !value.trim().is_empty()) {
            debug!(python = %python, "interpreter overridden from environment");
            self.install.python = python;
        }
        self
    }
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<ToolConfig, AppError> {
    let config: ToolConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `docbuild.toml` if present, then apply environment overrides.
pub fn load_config<R: RepositoryFilesystem + ?Sized>(repo: &R) -> Result<ToolConfig, AppError> {
    load_config_with(repo, |key| std::env::var(key).ok())
}

fn load_config_with<R: RepositoryFilesystem + ?Sized>(
    repo: &R,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ToolConfig, AppError> {
    let config = if repo.file_exists(CONFIG_FILE) {
        debug!(file = CONFIG_FILE, "loading tool configuration");
        parse_config_content(&repo.read_file(CONFIG_FILE)?)?
    } else {
        ToolConfig::default()
    };

    let config = config.apply_overrides(lookup);
    config.validate()?;
    Ok(config)
}
