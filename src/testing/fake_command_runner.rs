use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{CommandRunner, CommandSpec, CommandStatus};

/// Records every command and reports success, optionally failing one call.
#[derive(Debug, Default)]
pub struct FakeCommandRunner {
    calls: Mutex<Vec<CommandSpec>>,
    fail_at: Option<(usize, i32)>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `call`-th invocation (zero-based) exit with `code`.
    pub fn failing_at(call: usize, code: i32) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_at: Some((call, code)) }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, AppError> {
        let mut calls = self.calls.lock().unwrap();
        let call = calls.len();
        calls.push(spec.clone());

        match self.fail_at {
            Some((failing, code)) if failing == call => {
                Ok(CommandStatus { success: false, code: Some(code) })
            }
            _ => Ok(CommandStatus { success: true, code: Some(0) }),
        }
    }
}
