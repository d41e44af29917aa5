//! Assets embedded in the binary.

mod manifest_template;

pub use manifest_template::{ManifestTemplate, StarterOptions};
