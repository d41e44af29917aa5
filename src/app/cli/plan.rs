use super::Target;
use crate::app::api;
use crate::domain::{AppError, InstallPlan};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PlanFormat {
    /// Human-readable list
    Text,
    /// Machine-readable plan
    Json,
    /// Bash script runnable from the repository root
    Script,
}

pub fn run_plan(target: &Target, format: PlanFormat) -> Result<(), AppError> {
    let plan = api::plan(&target.root, target.manifest())?;

    match format {
        PlanFormat::Text => print!("{}", render_text(&plan)),
        PlanFormat::Json => {
            let json = serde_json::to_string_pretty(&plan)
                .map_err(|e| AppError::parse_error("install plan", e))?;
            println!("{}", json);
        }
        PlanFormat::Script => print!("{}", plan.render_script()),
    }
    Ok(())
}

fn render_text(plan: &InstallPlan) -> String {
    if plan.is_empty() {
        return format!("No install steps declared in {}\n", plan.manifest);
    }

    let runtime = plan
        .python_runtime
        .as_deref()
        .map(|version| format!(" (python {})", version))
        .unwrap_or_default();
    let mut out =
        format!("Install plan for {}{}: {} step(s)\n", plan.manifest, runtime, plan.steps.len());

    for step in &plan.steps {
        out.push_str(&format!("  {}. {} {}\n", step.index + 1, step.field, step.path));
        if step.working_dir != "." {
            out.push_str(&format!("     (in {})\n", step.working_dir));
        }
        out.push_str(&format!("     {}\n", step.command_line()));
    }
    out
}
