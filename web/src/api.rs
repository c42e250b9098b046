//! # HTTP Layer
//!
//! The axum router for the explorer front end. One page route does the
//! real work; the rest is the usual service furniture.
//!
//! | Method | Path       | Description                                  |
//! |--------|------------|----------------------------------------------|
//! | GET    | `/block`   | Block detail page for `?b=<identifier>`      |
//! | GET    | `/health`  | Liveness probe                               |
//!
//! Outcome mapping for `/block`:
//!
//! - block rendered → 200, `text/html`
//! - identifier names another record kind → 303 to `/q?b=<identifier>`
//!   (the generic record view, served elsewhere), identifier untouched
//! - daemon answered "unknown" → 404 with the explicit error text
//! - daemon unreachable or envelope broken → 502 with a generic body;
//!   the details go to the log, not the visitor

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use proofgold_explorer::config;
use proofgold_explorer::error::ExplorerError;
use proofgold_explorer::lookup::ChainQuery;
use proofgold_explorer::page::{block_page, PageOutcome};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared state for all request handlers. Cheap to clone; every field is
/// a shared handle.
#[derive(Clone)]
pub struct AppState {
    /// The daemon query seam. Trait object so tests can script it.
    pub client: Arc<dyn ChainQuery>,
    /// Metric handles for in-handler recording.
    pub metrics: SharedMetrics,
    /// Reported software version.
    pub version: String,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the page router with CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(config::BLOCK_PAGE_PATH, get(block_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — liveness only. Deliberately does not probe the daemon:
/// a daemon outage is a 502 on the page, not a dead front end.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "version": state.version }))
}

/// Query parameters for the block page.
#[derive(Debug, Deserialize)]
pub struct BlockPageQuery {
    /// The block identifier, passed through to the daemon verbatim.
    pub b: String,
}

/// `GET /block?b=<identifier>` — the block detail page.
async fn block_handler(
    State(state): State<AppState>,
    Query(params): Query<BlockPageQuery>,
) -> Response {
    let timer = state.metrics.page_resolve_duration_seconds.start_timer();
    let outcome = block_page(state.client.as_ref(), &params.b).await;
    timer.observe_duration();

    match outcome {
        Ok(PageOutcome::Rendered(body)) => {
            state.metrics.pages_rendered_total.inc();
            Html(body).into_response()
        }
        Ok(PageOutcome::Redirect(id)) => {
            state.metrics.lookup_redirects_total.inc();
            tracing::debug!(identifier = %id, "non-block record, deferring to generic view");
            Redirect::to(&format!("{}?b={}", config::GENERIC_LOOKUP_PATH, id)).into_response()
        }
        Err(ExplorerError::UnknownIdentifier) => {
            state.metrics.unknown_identifier_total.inc();
            tracing::info!(identifier = %params.b, "daemon does not recognize identifier");
            (
                StatusCode::NOT_FOUND,
                ExplorerError::UnknownIdentifier.to_string(),
            )
                .into_response()
        }
        Err(e) => {
            state.metrics.daemon_failures_total.inc();
            tracing::error!(identifier = %params.b, error = %e, "block page lookup failed");
            (StatusCode::BAD_GATEWAY, "chain daemon unavailable").into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
