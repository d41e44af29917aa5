use super::Target;
use crate::app::api::{self, InstallOptions};
use crate::domain::AppError;

pub fn run_install(target: &Target, dry_run: bool) -> Result<(), AppError> {
    let options = InstallOptions { dry_run };
    let report = api::install(&target.root, target.manifest(), options, |step, total| {
        println!("[{}/{}] {}", step.index + 1, total, step.command_line());
    })?;

    if report.dry_run {
        println!(
            "Dry run: {} step(s) from {} not executed",
            report.plan.steps.len(),
            report.plan.manifest
        );
        for step in &report.plan.steps {
            println!("  {}", step.command_line());
        }
    } else if report.plan.is_empty() {
        println!("✅ Nothing to install: {} declares no install steps", report.plan.manifest);
    } else {
        println!("✅ Installed {} step(s) from {}", report.completed, report.plan.manifest);
    }
    Ok(())
}
