use std::process::Command;

use tracing::debug;

use crate::domain::AppError;
use crate::ports::{CommandRunner, CommandSpec, CommandStatus};

/// Runs commands as child processes that inherit the terminal's stdio.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, AppError> {
        debug!(
            program = %spec.program,
            args = ?spec.args,
            cwd = %spec.working_dir.display(),
            "spawning"
        );

        let status = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .status()
            .map_err(|e| AppError::CommandSpawn {
                command: format!("{} {}", spec.program, spec.args.join(" ")),
                details: e.to_string(),
            })?;

        Ok(CommandStatus { success: status.success(), code: status.code() })
    }
}
