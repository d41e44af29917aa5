//! Manifest parsing and canonical serialization.

use crate::domain::AppError;

use super::model::Manifest;

/// Parse manifest YAML into the typed model.
///
/// `source` names the file in error messages.
pub fn parse_manifest_content(source: &str, content: &str) -> Result<Manifest, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::parse_error(source, "document is empty"));
    }
    serde_yaml::from_str(content).map_err(|e| AppError::parse_error(source, e))
}

/// Serialize the manifest in canonical form.
///
/// Defaults are omitted, so reparsing the output yields an equal `Manifest`.
pub fn to_canonical_yaml(manifest: &Manifest) -> Result<String, AppError> {
    serde_yaml::to_string(manifest).map_err(|e| AppError::parse_error("manifest", e))
}
