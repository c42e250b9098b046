//! # CLI Interface
//!
//! Command-line surface of `proofgold-web`, via `clap` derive. Three
//! subcommands: `serve` (the page server), `query` (one-shot pipeline run
//! against the daemon, printed to stdout), and `version`.

use clap::{Parser, Subcommand};

use proofgold_explorer::config;

use crate::logging::LogFormat;

/// Proofgold block explorer web front end.
///
/// Serves the block detail page: queries the Proofgold daemon for the
/// requested identifier, classifies the answer, and renders the block's
/// fields, or redirects to the generic record view when the identifier
/// names something else.
#[derive(Parser, Debug)]
#[command(
    name = "proofgold-web",
    about = "Proofgold block explorer web front end",
    version,
    propagate_version = true
)]
pub struct ExplorerCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve block pages over HTTP.
    Serve(ServeArgs),
    /// Resolve one identifier through the same pipeline and print the
    /// outcome to stdout.
    Query(QueryArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address of the Proofgold daemon's query socket.
    #[arg(long, env = "PGEXP_DAEMON_ADDR", default_value = config::DEFAULT_DAEMON_ADDR)]
    pub daemon_addr: String,

    /// Port for the block page server.
    #[arg(long, env = "PGEXP_HTTP_PORT", default_value_t = config::DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "PGEXP_METRICS_PORT", default_value_t = config::DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Log output format.
    #[arg(long, env = "PGEXP_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Arguments for the `query` subcommand.
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Identifier to resolve (block hash or any other record id).
    pub identifier: String,

    /// Address of the Proofgold daemon's query socket.
    #[arg(long, env = "PGEXP_DAEMON_ADDR", default_value = config::DEFAULT_DAEMON_ADDR)]
    pub daemon_addr: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        ExplorerCli::command().debug_assert();
    }

    #[test]
    fn serve_defaults_come_from_config() {
        let cli = ExplorerCli::parse_from(["proofgold-web", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.daemon_addr, config::DEFAULT_DAEMON_ADDR);
        assert_eq!(args.http_port, config::DEFAULT_HTTP_PORT);
        assert_eq!(args.metrics_port, config::DEFAULT_METRICS_PORT);
    }

    #[test]
    fn query_takes_a_positional_identifier() {
        let cli = ExplorerCli::parse_from(["proofgold-web", "query", "abc123"]);
        let Commands::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.identifier, "abc123");
    }
}
