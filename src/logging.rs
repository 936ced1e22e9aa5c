//! Diagnostic logging on stderr
//!
//! `RUST_LOG` always wins. Without it the level comes from the flags:
//! `--debug` enables debug output, `--verbose` info, and warnings otherwise.

use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

fn default_directive(debug: bool, verbose: bool) -> &'static str {
    if debug {
        "boomipulse=debug"
    } else if verbose {
        "boomipulse=info"
    } else {
        "boomipulse=warn"
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(debug: bool, verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug, verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
