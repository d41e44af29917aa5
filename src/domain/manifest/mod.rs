//! The documentation-build manifest: model, vocabulary, parsing, discovery and checks.

pub mod discovery;
pub mod model;
pub mod parse;
pub mod validation;
pub mod vocabulary;

pub use discovery::{MANIFEST_CANDIDATES, ManifestLocation, locate_manifest};
pub use model::{
    AllOr, Build, Conda, InstallMethod, InstallStep, Manifest, Mkdocs, OutputFormat, PackageStep,
    Python, RankingRule, RankingRules, RankingWeight, RequirementsStep, Search, Sphinx,
    SphinxBuilder, Submodules,
};
pub use parse::{parse_manifest_content, to_canonical_yaml};
pub use validation::validate_manifest;
