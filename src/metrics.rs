//! Simple in-process counters exposed as `GET /metrics` in Prometheus text
//! format. No external library needed — all counters are `AtomicU64`
//! incremented inline by the REST layer. The audit engine never touches them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// In-process counters shared across all connections.
#[derive(Debug)]
pub struct GatewayMetrics {
    /// Total audit requests that reached the engine since gateway start.
    pub audits_total: AtomicU64,
    /// Audits that came back APPROVED.
    pub audits_approved: AtomicU64,
    /// Audits that came back BLOCKED.
    pub audits_blocked: AtomicU64,
    /// Requests rejected before evaluation (bad JSON / wrong content type).
    pub parse_failures: AtomicU64,
    /// Gateway start time — used to calculate uptime in the metrics response.
    pub started_at: Instant,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self {
            audits_total: AtomicU64::new(0),
            audits_approved: AtomicU64::new(0),
            audits_blocked: AtomicU64::new(0),
            parse_failures: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn inc_audits(&self) {
        self.audits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_approved(&self) {
        self.audits_approved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_blocked(&self) {
        self.audits_blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_parse_failures(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Render counters in Prometheus text format.
    pub fn render_prometheus(&self) -> String {
        let uptime = self.started_at.elapsed().as_secs();
        let audits_total = self.audits_total.load(Ordering::Relaxed);
        let audits_approved = self.audits_approved.load(Ordering::Relaxed);
        let audits_blocked = self.audits_blocked.load(Ordering::Relaxed);
        let parse_failures = self.parse_failures.load(Ordering::Relaxed);

        format!(
            "# HELP sentineld_uptime_seconds Gateway uptime in seconds.\n\
             # TYPE sentineld_uptime_seconds gauge\n\
             sentineld_uptime_seconds {uptime}\n\
             # HELP sentineld_audits_total Total audits evaluated since start.\n\
             # TYPE sentineld_audits_total counter\n\
             sentineld_audits_total {audits_total}\n\
             # HELP sentineld_audits_approved_total Audits that returned APPROVED.\n\
             # TYPE sentineld_audits_approved_total counter\n\
             sentineld_audits_approved_total {audits_approved}\n\
             # HELP sentineld_audits_blocked_total Audits that returned BLOCKED.\n\
             # TYPE sentineld_audits_blocked_total counter\n\
             sentineld_audits_blocked_total {audits_blocked}\n\
             # HELP sentineld_parse_failures_total Requests rejected before evaluation.\n\
             # TYPE sentineld_parse_failures_total counter\n\
             sentineld_parse_failures_total {parse_failures}\n"
        )
    }
}

impl Default for GatewayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
