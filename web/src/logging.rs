//! # Structured Logging
//!
//! Sets up the `tracing` subscriber for the web front end. Output goes to
//! stderr; stdout stays clean for the `query` subcommand, which prints the
//! rendered page there.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format, selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output for a terminal.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

/// Initializes the global subscriber. Call once, before anything logs;
/// a second call panics.
///
/// `default_directives` applies when `RUST_LOG` is unset; the usual form
/// is `"proofgold_web=info,proofgold_explorer=info"`. When `RUST_LOG` is
/// set it wins outright.
pub fn init(default_directives: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }
}
