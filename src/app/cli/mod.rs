//! CLI Adapter.

mod check;
mod fmt;
mod init;
mod install;
mod logging;
mod plan;
mod rank;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AppError;

pub use logging::LogFormat;

#[derive(Parser)]
#[command(name = "docbuild")]
#[command(version)]
#[command(
    about = "Validate documentation-build manifests and run their Python install steps",
    long_about = None
)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    directory: Option<PathBuf>,

    /// Manifest path relative to the repository root; skips discovery
    #[arg(short, long, value_name = "FILE", global = true)]
    manifest: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format: text (default) or json
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest against the repository
    #[clap(visible_alias = "c")]
    Check {
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
    /// Show the ordered install plan
    #[clap(visible_alias = "p")]
    Plan {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: plan::PlanFormat,
    },
    /// Run the install steps in order
    #[clap(visible_alias = "in")]
    Install {
        /// Print the commands without running them
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Print or rewrite the manifest in canonical form
    Fmt {
        /// Rewrite the manifest in place
        #[arg(short, long, conflicts_with = "check")]
        write: bool,
        /// Exit non-zero when the manifest is not canonical
        #[arg(long)]
        check: bool,
    },
    /// Show the search weight of page paths
    #[clap(visible_alias = "r")]
    Rank {
        /// Page paths relative to the built site, e.g. usage/basics.html
        #[arg(required = true)]
        pages: Vec<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write a starter manifest
    #[clap(visible_alias = "i")]
    Init(init::InitArgs),
}

/// Repository root and manifest selection shared by every subcommand.
struct Target {
    root: PathBuf,
    manifest: Option<String>,
}

impl Target {
    fn resolve(directory: Option<PathBuf>, manifest: Option<String>) -> Result<Self, AppError> {
        let root = match directory {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        Ok(Self { root, manifest })
    }

    fn manifest(&self) -> Option<&str> {
        self.manifest.as_deref()
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, &cli.log_format);

    let result = Target::resolve(cli.directory, cli.manifest).and_then(|target| {
        match cli.command {
            Commands::Check { strict } => check::run_check(&target, strict),
            Commands::Plan { format } => plan::run_plan(&target, format).map(|_| 0),
            Commands::Install { dry_run } => install::run_install(&target, dry_run).map(|_| 0),
            Commands::Fmt { write, check } => fmt::run_fmt(&target, write, check),
            Commands::Rank { pages, json } => rank::run_rank(&target, &pages, json).map(|_| 0),
            Commands::Init(args) => init::run_init(&target, args).map(|_| 0),
        }
    });

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
