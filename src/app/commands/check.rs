//! Check command: structural and repository-level validation of the manifest.

use crate::app::AppContext;
use crate::domain::manifest::{locate_manifest, parse_manifest_content, validate_manifest};
use crate::domain::{AppError, Diagnostics};
use crate::ports::RepositoryFilesystem;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub manifest: String,
    pub errors: usize,
    pub warnings: usize,
    pub exit_code: i32,
}

pub fn execute<R: RepositoryFilesystem>(
    ctx: &AppContext<R>,
    options: CheckOptions,
) -> Result<CheckOutcome, AppError> {
    let location = locate_manifest(ctx.repo(), ctx.manifest_override())?;
    let strict = options.strict || ctx.config().check.strict;
    let mut diagnostics = Diagnostics::default();

    for shadowed in &location.shadowed {
        diagnostics.push_warning(
            shadowed.clone(),
            format!("ignored because {} takes precedence", location.path),
        );
    }

    let content = ctx.repo().read_file(&location.path)?;
    match parse_manifest_content(&location.path, &content) {
        Ok(manifest) => validate_manifest(&manifest, &location.path, ctx.repo(), &mut diagnostics),
        Err(AppError::ParseError { details, .. }) => {
            diagnostics.push_error(location.path.clone(), details);
        }
        Err(err) => return Err(err),
    }

    diagnostics.emit();

    let errors = diagnostics.error_count();
    let warnings = diagnostics.warning_count();
    let exit_code = if errors > 0 {
        1
    } else if warnings > 0 && strict {
        2
    } else {
        0
    };

    if errors == 0 && warnings == 0 {
        println!("All checks passed.");
    } else if errors == 0 && !strict {
        eprintln!("Check completed with {} warning(s).", warnings);
    } else {
        eprintln!("Check failed: {} error(s), {} warning(s) found.", errors, warnings);
    }

    Ok(CheckOutcome { manifest: location.path, errors, warnings, exit_code })
}
