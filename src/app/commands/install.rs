//! Install command: run the planned steps in order, stopping at the first failure.

use tracing::{info, warn};

use crate::app::AppContext;
use crate::app::commands::plan;
use crate::domain::install_plan::ensure_step_path;
use crate::domain::{AppError, InstallPlan, PlannedStep};
use crate::ports::{CommandRunner, CommandSpec, RepositoryFilesystem};

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Plan only; run nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub plan: InstallPlan,
    /// Number of steps that ran to completion.
    pub completed: usize,
    pub dry_run: bool,
}

/// Execute the install plan. `on_step` is invoked before each step starts.
pub fn execute<R, C, F>(
    ctx: &AppContext<R>,
    runner: &C,
    options: InstallOptions,
    mut on_step: F,
) -> Result<InstallReport, AppError>
where
    R: RepositoryFilesystem,
    C: CommandRunner + ?Sized,
    F: FnMut(&PlannedStep, usize),
{
    let plan = plan::execute(ctx)?;
    let total = plan.steps.len();

    if options.dry_run {
        info!(steps = total, "dry run; nothing executed");
        return Ok(InstallReport { plan, completed: 0, dry_run: true });
    }

    let mut completed = 0;
    for step in &plan.steps {
        // Earlier steps may have removed or replaced the directory.
        ensure_step_path(ctx.repo(), &step.field, &step.path)?;
        on_step(step, total);

        let spec = CommandSpec {
            program: step.program.clone(),
            args: step.args.clone(),
            working_dir: ctx.repo().resolve_path(&step.working_dir),
        };
        info!(index = step.index, path = %step.path, "running install step");
        let status = runner.run(&spec)?;

        if !status.success {
            warn!(index = step.index, status = %status, "install step failed");
            return Err(AppError::StepFailed {
                index: step.index,
                command: step.command_line(),
                status: status.to_string(),
            });
        }
        completed += 1;
    }

    info!(completed, "install finished");
    Ok(InstallReport { plan, completed, dry_run: false })
}
