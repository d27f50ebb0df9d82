//! HTTP round-trip tests for the gateway's REST surface.
//! Spins the server up on a random port and talks raw HTTP over TcpStream.

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use sentineld::{
    config::GatewayConfig,
    metrics::GatewayMetrics,
    policy::{AuditEngine, AuditPolicy},
    rest, AppContext,
};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Build a minimal AppContext for testing.
fn make_test_ctx(dir: &TempDir) -> Arc<AppContext> {
    let config = Arc::new(GatewayConfig::new(
        None,
        Some(dir.path().to_path_buf()),
        Some("error".to_string()),
        None,
    ));
    let policy = Arc::new(AuditPolicy::default_rules());
    Arc::new(AppContext {
        config,
        engine: AuditEngine::new(policy),
        metrics: Arc::new(GatewayMetrics::new()),
        started_at: std::time::Instant::now(),
    })
}

/// Serve the router on an OS-assigned port and return the address.
async fn spawn_server(ctx: Arc<AppContext>) -> SocketAddr {
    let router = rest::build_router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Send a raw HTTP request and return (status code, body).
async fn send_request(addr: SocketAddr, request: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let response = String::from_utf8_lossy(&buf).into_owned();

    let status: u16 = response
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .expect("malformed status line");

    let body_start = response
        .find("\r\n\r\n")
        .map(|i| i + 4)
        .expect("no body in response");
    (status, response[body_start..].to_string())
}

async fn post_audit(addr: SocketAddr, body: &str, content_type: Option<&str>) -> (u16, serde_json::Value) {
    let mut request = String::from("POST /api/audit HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n");
    if let Some(ct) = content_type {
        request.push_str(&format!("Content-Type: {ct}\r\n"));
    }
    request.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));

    let (status, body) = send_request(addr, &request).await;
    let json = serde_json::from_str(&body).expect("body is not valid JSON");
    (status, json)
}

// ─── POST /api/audit ─────────────────────────────────────────────────────────

#[tokio::test]
async fn audit_approves_safe_payload() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(make_test_ctx(&dir)).await;

    let (status, json) = post_audit(
        addr,
        r#"{"user": "john_doe", "action": "view_profile", "refund": 50}"#,
        Some("application/json"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "APPROVED");
    assert!(json.get("reason").is_none(), "approved responses carry no reason");
}

#[tokio::test]
async fn audit_blocks_banned_keyword_with_200() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(make_test_ctx(&dir)).await;

    let (status, json) = post_audit(
        addr,
        r#"{"query": "DROP TABLE users", "user": "hacker"}"#,
        Some("application/json"),
    )
    .await;

    // 200 because the API call succeeded; the content was just blocked.
    assert_eq!(status, 200);
    assert_eq!(json["status"], "BLOCKED");
    assert!(json["reason"].as_str().unwrap().contains("DROP TABLE"));
}

#[tokio::test]
async fn audit_blocks_high_refund() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(make_test_ctx(&dir)).await;

    let (status, json) = post_audit(
        addr,
        r#"{"customer": "alice", "refund_amount": 750, "reason": "defective"}"#,
        Some("application/json"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "BLOCKED");
    let reason = json["reason"].as_str().unwrap();
    assert!(reason.contains("750"), "wrong reason: {reason}");
    assert!(reason.contains("500"), "wrong reason: {reason}");
}

#[tokio::test]
async fn invalid_json_is_rejected_with_400() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(make_test_ctx(&dir)).await;

    let (status, json) = post_audit(addr, "{not valid json", Some("application/json")).await;

    assert_eq!(status, 400);
    assert_eq!(json["status"], "BLOCKED");
    assert!(
        json["reason"].as_str().unwrap().contains("JSON parsing error"),
        "wrong reason: {}",
        json["reason"]
    );
}

#[tokio::test]
async fn missing_content_type_is_rejected_with_400() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(make_test_ctx(&dir)).await;

    let (status, json) = post_audit(addr, r#"{"user": "john_doe"}"#, None).await;

    assert_eq!(status, 400);
    assert_eq!(json["status"], "BLOCKED");
    assert!(json["reason"]
        .as_str()
        .unwrap()
        .contains("Content-Type"));
}

// ─── GET /health ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_healthy() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(make_test_ctx(&dir)).await;

    let (status, body) = send_request(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"].as_str().unwrap(), env!("CARGO_PKG_VERSION"));
}

// ─── GET /metrics ────────────────────────────────────────────────────────────

#[tokio::test]
async fn metrics_count_audit_traffic() {
    let dir = TempDir::new().unwrap();
    let ctx = make_test_ctx(&dir);
    let addr = spawn_server(ctx.clone()).await;

    post_audit(addr, r#"{"user": "ok"}"#, Some("application/json")).await;
    post_audit(addr, r#"{"msg": "shut up"}"#, Some("application/json")).await;
    post_audit(addr, "oops", Some("application/json")).await;

    let (status, body) = send_request(
        addr,
        "GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert_eq!(status, 200);
    assert!(body.contains("sentineld_audits_total 2"), "got: {body}");
    assert!(body.contains("sentineld_audits_approved_total 1"), "got: {body}");
    assert!(body.contains("sentineld_audits_blocked_total 1"), "got: {body}");
    assert!(body.contains("sentineld_parse_failures_total 1"), "got: {body}");
}
