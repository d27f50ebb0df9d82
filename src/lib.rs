pub mod config;
pub mod metrics;
pub mod policy;
pub mod rest;

use std::sync::Arc;

use config::GatewayConfig;
use metrics::GatewayMetrics;
use policy::AuditEngine;

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<GatewayConfig>,
    /// The audit decision engine. Stateless per call; the only shared data is
    /// the immutable policy inside it, so handlers may audit concurrently.
    pub engine: AuditEngine,
    /// In-process counters exposed at `GET /metrics`.
    pub metrics: Arc<GatewayMetrics>,
    pub started_at: std::time::Instant,
}
