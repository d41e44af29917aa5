use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior, context};

use crate::domain::AppError;
use crate::domain::manifest::OutputFormat;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const MANIFEST_TEMPLATE: &str = "readthedocs.yaml.j2";

/// Inputs for the starter manifest written by `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterOptions {
    pub os: String,
    pub python: String,
    pub sphinx_configuration: String,
    pub requirements: Option<String>,
    pub formats: Vec<OutputFormat>,
}

impl Default for StarterOptions {
    fn default() -> Self {
        Self {
            os: "ubuntu-22.04".to_string(),
            python: "3.11".to_string(),
            sphinx_configuration: "docs/conf.py".to_string(),
            requirements: Some("docs/requirements.txt".to_string()),
            formats: Vec::new(),
        }
    }
}

/// Renders the embedded starter manifest.
pub struct ManifestTemplate;

impl ManifestTemplate {
    pub fn render(options: &StarterOptions) -> Result<String, AppError> {
        let source = TEMPLATES_DIR
            .get_file(MANIFEST_TEMPLATE)
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| {
                AppError::Template(format!("embedded template {} is missing", MANIFEST_TEMPLATE))
            })?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("yaml_quote", yaml_quote);
        env.add_template(MANIFEST_TEMPLATE, source)
            .map_err(|e| AppError::Template(e.to_string()))?;

        let template =
            env.get_template(MANIFEST_TEMPLATE).map_err(|e| AppError::Template(e.to_string()))?;
        let formats: Vec<&str> = options.formats.iter().map(OutputFormat::as_str).collect();

        let mut rendered = template
            .render(context! {
                os => &options.os,
                python => &options.python,
                sphinx_configuration => &options.sphinx_configuration,
                requirements => &options.requirements,
                formats => &formats,
            })
            .map_err(|e| AppError::Template(e.to_string()))?;

        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

/// Render a string as a double-quoted YAML scalar. JSON strings are valid YAML.
fn yaml_quote(value: String) -> Result<String, minijinja::Error> {
    serde_json::to_string(&value)
        .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))
}
