// rest/routes/metrics.rs — GET /metrics (Prometheus text exposition).

use axum::extract::State;
use std::sync::Arc;

use crate::AppContext;

pub async fn get_metrics(State(ctx): State<Arc<AppContext>>) -> String {
    ctx.metrics.render_prometheus()
}
