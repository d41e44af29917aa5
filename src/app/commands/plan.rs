use crate::app::AppContext;
use crate::app::commands::load_manifest;
use crate::domain::{AppError, InstallPlan};
use crate::ports::RepositoryFilesystem;

/// Derive the ordered install plan for the located manifest.
pub fn execute<R: RepositoryFilesystem>(ctx: &AppContext<R>) -> Result<InstallPlan, AppError> {
    let loaded = load_manifest(ctx)?;
    InstallPlan::build(
        &loaded.manifest,
        &loaded.location.path,
        ctx.repo(),
        &ctx.config().plan_settings(),
    )
}
