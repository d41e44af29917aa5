use tracing_subscriber::{EnvFilter, fmt};

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Initialize tracing based on CLI flags. `RUST_LOG` takes precedence.
///
/// Logs go to stderr so stdout stays machine-readable.
pub(super) fn init_tracing(verbose: u8, format: &LogFormat) {
    let filter = match verbose {
        0 => "docbuild=warn",
        1 => "docbuild=info",
        2 => "docbuild=debug",
        _ => "docbuild=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).with_writer(std::io::stderr).init();
        }
    }
}
