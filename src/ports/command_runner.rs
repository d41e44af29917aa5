//! External process execution.

use std::fmt;
use std::path::PathBuf;

use crate::domain::AppError;

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Exit information for a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("signal termination"),
        }
    }
}

pub trait CommandRunner {
    /// Run the command to completion. Spawn failures are errors; non-zero exits are not.
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, AppError>;
}
