// rest/mod.rs — Public HTTP surface of the audit gateway.
//
// Axum server bridging transport concerns to the pure audit engine. Parse
// failures are handled here and never reach the engine.
//
// Endpoints:
//   POST /api/audit
//   GET  /health
//   GET  /metrics

pub mod routes;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("audit gateway listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/audit", post(routes::audit::audit_request))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics::get_metrics))
        // The gateway fronts browser-facing upstream services; any origin may call it.
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
