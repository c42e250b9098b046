// Copyright (c) 2026 Proofgold Community. MIT License.
// See LICENSE for details.

//! # Proofgold Explorer — Web Front End
//!
//! Entry point for the `proofgold-web` binary. Parses CLI arguments,
//! initializes logging and metrics, and serves the block page plus the
//! metrics endpoint until a shutdown signal arrives.
//!
//! The binary supports three subcommands:
//!
//! - `serve`   — run the block page server
//! - `query`   — resolve one identifier and print the outcome
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use proofgold_explorer::lookup::DaemonClient;
use proofgold_explorer::page::{block_page, PageOutcome};

use cli::{Commands, ExplorerCli};
use metrics::ExplorerMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ExplorerCli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Query(args) => query(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Runs the page server and the metrics endpoint side by side.
async fn serve(args: cli::ServeArgs) -> Result<()> {
    logging::init(
        "proofgold_web=info,proofgold_explorer=info,tower_http=info",
        args.log_format,
    );

    tracing::info!(
        daemon = %args.daemon_addr,
        http_port = args.http_port,
        metrics_port = args.metrics_port,
        "starting proofgold-web"
    );

    // --- Metrics ---
    let node_metrics = Arc::new(ExplorerMetrics::new());

    // --- Application state ---
    let state = api::AppState {
        client: Arc::new(DaemonClient::new(args.daemon_addr)),
        metrics: Arc::clone(&node_metrics),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // --- Page server ---
    let page_router = api::create_router(state);
    let page_addr = format!("0.0.0.0:{}", args.http_port);
    let page_listener = tokio::net::TcpListener::bind(&page_addr)
        .await
        .with_context(|| format!("failed to bind page listener on {}", page_addr))?;
    tracing::info!("block page server listening on {}", page_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(page_listener, page_router) => {
            if let Err(e) = res {
                tracing::error!("page server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("proofgold-web stopped");
    Ok(())
}

/// Resolves one identifier through the same pipeline the server uses and
/// prints the outcome to stdout.
async fn query(args: cli::QueryArgs) -> Result<()> {
    logging::init("proofgold_web=warn", logging::LogFormat::Pretty);

    let client = DaemonClient::new(args.daemon_addr);
    let outcome = block_page(&client, &args.identifier)
        .await
        .with_context(|| format!("lookup failed for {}", args.identifier))?;

    match outcome {
        PageOutcome::Rendered(html) => println!("{}", html),
        PageOutcome::Redirect(id) => {
            println!("{} is not a block; see the generic record view", id)
        }
    }
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("proofgold-web {}", env!("CARGO_PKG_VERSION"));
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
