//! Ordered install plan derived from `python.install`.
//!
//! Steps keep manifest order: later packages may import earlier ones at
//! install time. Plan derivation is pure; the same manifest and repository
//! state always produce the same plan.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::AppError;
use crate::domain::manifest::vocabulary::SUPPORTED_VERSION;
use crate::domain::manifest::{InstallMethod, InstallStep, Manifest};
use crate::ports::RepositoryFilesystem;

/// Interpreter and pip tuning applied to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSettings {
    pub python: String,
    pub extra_pip_args: Vec<String>,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self { python: "python".to_string(), extra_pip_args: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Requirements,
    Pip,
    Setuptools,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    /// Position in `python.install`.
    pub index: usize,
    /// Manifest location of the step's path, e.g. `python.install[3].path`.
    pub field: String,
    pub kind: StepKind,
    pub path: String,
    /// Root-relative directory the command runs in.
    pub working_dir: String,
    pub program: String,
    pub args: Vec<String>,
}

impl PlannedStep {
    /// The command as a single shell-safe line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    /// Manifest the plan was derived from.
    pub manifest: String,
    /// Runtime requested by `build.tools.python`, if any.
    pub python_runtime: Option<String>,
    pub steps: Vec<PlannedStep>,
}

impl InstallPlan {
    /// Derive the plan, failing on the first step whose path is missing.
    pub fn build<R: RepositoryFilesystem + ?Sized>(
        manifest: &Manifest,
        manifest_path: &str,
        repo: &R,
        settings: &PlanSettings,
    ) -> Result<Self, AppError> {
        if manifest.version != SUPPORTED_VERSION {
            return Err(AppError::UnsupportedVersion {
                found: manifest.version,
                expected: SUPPORTED_VERSION,
            });
        }

        let mut steps = Vec::with_capacity(manifest.install_steps().len());
        for (index, step) in manifest.install_steps().iter().enumerate() {
            let field = format!("python.install[{}].{}", index, step.path_key());
            ensure_step_path(repo, &field, step.path())?;

            let planned = plan_step(index, field, step, settings);
            debug!(index, command = %planned.command_line(), "planned install step");
            steps.push(planned);
        }

        info!(manifest = manifest_path, steps = steps.len(), "install plan ready");
        Ok(Self {
            manifest: manifest_path.to_string(),
            python_runtime: manifest.tool_version("python").map(str::to_string),
            steps,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render the plan as a bash script meant to run from the repository root.
    pub fn render_script(&self) -> String {
        let mut script = String::from("#!/usr/bin/env bash\n");
        let _ = writeln!(
            script,
            "# Install steps from {}; run from the repository root.",
            self.manifest
        );
        script.push_str("set -euo pipefail\n");

        for step in &self.steps {
            script.push('\n');
            let _ = writeln!(script, "# {}: {}", step.field, step.path);
            if step.working_dir == "." {
                let _ = writeln!(script, "{}", step.command_line());
            } else {
                let _ = writeln!(
                    script,
                    "(cd {} && {})",
                    shell_quote(&step.working_dir),
                    step.command_line()
                );
            }
        }
        script
    }
}

/// Fail fast on a path that escapes the root or does not exist.
pub(crate) fn ensure_step_path<R: RepositoryFilesystem + ?Sized>(
    repo: &R,
    field: &str,
    path: &str,
) -> Result<(), AppError> {
    repo.ensure_within_root(path)?;
    if path.trim().is_empty() || !repo.file_exists(path) {
        return Err(AppError::MissingPath { field: field.to_string(), path: path.to_string() });
    }
    Ok(())
}

fn plan_step(
    index: usize,
    field: String,
    step: &InstallStep,
    settings: &PlanSettings,
) -> PlannedStep {
    let python = settings.python.clone();

    match step {
        InstallStep::Requirements(requirements) => {
            let mut args = pip_install_args(settings);
            args.extend(["--exists-action=w".to_string(), "-r".to_string()]);
            args.push(requirements.requirements.clone());
            PlannedStep {
                index,
                field,
                kind: StepKind::Requirements,
                path: requirements.requirements.clone(),
                working_dir: ".".to_string(),
                program: python,
                args,
            }
        }
        InstallStep::Package(package) if package.method == InstallMethod::Setuptools => {
            PlannedStep {
                index,
                field,
                kind: StepKind::Setuptools,
                path: package.path.clone(),
                working_dir: package.path.trim_end_matches('/').to_string(),
                program: python,
                args: vec!["setup.py".to_string(), "install".to_string(), "--force".to_string()],
            }
        }
        InstallStep::Package(package) => {
            let target = if package.extra_requirements.is_empty() {
                package.path.clone()
            } else {
                format!(
                    "{}[{}]",
                    package.path.trim_end_matches('/'),
                    package.extra_requirements.join(",")
                )
            };

            let mut args = pip_install_args(settings);
            args.extend([
                "--upgrade".to_string(),
                "--upgrade-strategy".to_string(),
                "only-if-needed".to_string(),
                "-e".to_string(),
                target,
            ]);
            PlannedStep {
                index,
                field,
                kind: StepKind::Pip,
                path: package.path.clone(),
                working_dir: ".".to_string(),
                program: python,
                args,
            }
        }
    }
}

fn pip_install_args(settings: &PlanSettings) -> Vec<String> {
    let mut args: Vec<String> =
        ["-m", "pip", "install", "--no-cache-dir"].iter().map(|s| s.to_string()).collect();
    args.extend(settings.extra_pip_args.iter().cloned());
    args
}

/// Quote a word for POSIX shells when it contains anything beyond a safe set.
pub(crate) fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '_' | '-' | '.' | '/' | '=' | ':' | ',' | '+' | '@' | '%')
        });
    if safe { word.to_string() } else { format!("'{}'", word.replace('\'', "'\\''")) }
}
