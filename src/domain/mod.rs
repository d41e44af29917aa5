pub mod diagnostics;
pub mod error;
pub mod install_plan;
pub mod manifest;
pub mod search;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::AppError;
pub use install_plan::{InstallPlan, PlanSettings, PlannedStep, StepKind};
pub use manifest::{Manifest, ManifestLocation};
pub use search::{PageRank, PathPattern, SearchIndex};
