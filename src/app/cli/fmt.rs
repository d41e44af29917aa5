use super::Target;
use crate::app::api::{self, FmtOptions};
use crate::domain::AppError;

pub fn run_fmt(target: &Target, write: bool, check: bool) -> Result<i32, AppError> {
    let outcome = api::fmt(&target.root, target.manifest(), FmtOptions { write })?;

    if check {
        if outcome.changed {
            eprintln!("{} is not in canonical form", outcome.manifest);
            return Ok(1);
        }
        println!("✅ {} is already canonical", outcome.manifest);
    } else if write {
        if outcome.written {
            println!("✅ Formatted {}", outcome.manifest);
        } else {
            println!("✅ {} is already canonical", outcome.manifest);
        }
    } else {
        print!("{}", outcome.formatted);
    }
    Ok(0)
}
