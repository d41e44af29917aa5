//! docbuild: validate documentation-build manifests and run their Python install steps.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api;
pub use domain::{AppError, InstallPlan, Manifest, PageRank, PlannedStep};
