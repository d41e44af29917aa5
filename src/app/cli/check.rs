//! Check command implementation.

use super::Target;
use crate::app::api::{self, CheckOptions};
use crate::domain::AppError;

pub fn run_check(target: &Target, strict: bool) -> Result<i32, AppError> {
    let outcome = api::check(&target.root, target.manifest(), CheckOptions { strict })?;

    Ok(outcome.exit_code)
}
