//! `POST /api/audit` — run the decision engine over the request body.
//!
//! The body is read raw so that parse failures stay a caller-side error
//! class: bad JSON or a missing JSON content type is HTTP 400 with a
//! descriptive reason and never reaches the engine. Any successfully parsed
//! payload gets HTTP 200 carrying the engine's verdict.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::policy::Verdict;
use crate::AppContext;

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Response body for both verdicts and pre-engine rejections.
#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Verdict> for AuditResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => Self {
                status: "APPROVED",
                reason: None,
            },
            Verdict::Blocked { reason } => Self {
                status: "BLOCKED",
                reason: Some(reason),
            },
        }
    }
}

/// Why a request was rejected before reaching the engine.
///
/// Distinct from a BLOCKED verdict: these are caller errors (HTTP 400), not
/// policy decisions.
#[derive(Debug, Error)]
pub enum AuditRejection {
    #[error("Invalid JSON payload or missing Content-Type header")]
    NotJson,
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl IntoResponse for AuditRejection {
    fn into_response(self) -> Response {
        let body = AuditResponse {
            status: "BLOCKED",
            reason: Some(self.to_string()),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ─── Handler ──────────────────────────────────────────────────────────────────

pub async fn audit_request(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AuditResponse>, AuditRejection> {
    let audit_id = Uuid::new_v4();

    if !is_json_content_type(&headers) {
        ctx.metrics.inc_parse_failures();
        warn!(%audit_id, "audit request rejected — not a JSON request");
        return Err(AuditRejection::NotJson);
    }

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        ctx.metrics.inc_parse_failures();
        warn!(%audit_id, err = %e, "audit request rejected — body is not valid JSON");
        AuditRejection::Parse(e)
    })?;

    let verdict = ctx.engine.audit(&payload);
    ctx.metrics.inc_audits();
    match &verdict {
        Verdict::Approved => {
            ctx.metrics.inc_approved();
            info!(%audit_id, outcome = "APPROVED", "audit complete");
        }
        Verdict::Blocked { reason } => {
            ctx.metrics.inc_blocked();
            info!(%audit_id, outcome = "BLOCKED", reason = %reason, "audit complete");
        }
    }

    Ok(Json(verdict.into()))
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(';')
                .next()
                .unwrap_or("")
                .trim()
                .eq_ignore_ascii_case("application/json")
        })
        .unwrap_or(false)
}
