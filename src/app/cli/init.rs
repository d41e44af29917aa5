use clap::Args;

use super::Target;
use crate::app::api::{self, InitOptions, StarterOptions};
use crate::domain::AppError;
use crate::domain::manifest::OutputFormat;

#[derive(Args)]
pub struct InitArgs {
    /// Build image
    #[arg(long, default_value = "ubuntu-22.04")]
    os: String,
    /// Python runtime under build.tools
    #[arg(long, default_value = "3.11")]
    python: String,
    /// Sphinx configuration file
    #[arg(long, default_value = "docs/conf.py")]
    sphinx_config: String,
    /// Requirements file installed before the docs build
    #[arg(long, default_value = "docs/requirements.txt", conflicts_with = "no_requirements")]
    requirements: String,
    /// Omit the python.install section
    #[arg(long)]
    no_requirements: bool,
    /// Extra output format (repeatable)
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatArg>,
    /// Overwrite an existing manifest
    #[arg(short, long)]
    force: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FormatArg {
    Htmlzip,
    Pdf,
    Epub,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Htmlzip => OutputFormat::Htmlzip,
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Epub => OutputFormat::Epub,
        }
    }
}

pub fn run_init(target: &Target, args: InitArgs) -> Result<(), AppError> {
    let mut formats: Vec<OutputFormat> = Vec::new();
    for format in args.formats.into_iter().map(OutputFormat::from) {
        if !formats.contains(&format) {
            formats.push(format);
        }
    }

    let options = InitOptions {
        starter: StarterOptions {
            os: args.os,
            python: args.python,
            sphinx_configuration: args.sphinx_config,
            requirements: (!args.no_requirements).then_some(args.requirements),
            formats,
        },
        force: args.force,
    };

    let written = api::init(&target.root, target.manifest(), options)?;
    println!("✅ Created {}", written);
    Ok(())
}
