// tests/support/helpers.rs
use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use content_gateway::app::build_app;
use content_gateway::application::ports::time::Clock;
use content_gateway::config::AppConfig;
use serde_json::Value;
use wiremock::MockServer;

use super::mocks::ManualClock;

/// モックサーバーを指すテスト用設定。リトライ待ちは 1ms に短縮する
pub fn test_config(base_url: &str, overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("CONTENT_API_URL", base_url),
        ("CONTENT_API_RETRY_DELAY_MS", "1"),
        ("CONTENT_API_TIMEOUT_MS", "2000"),
        ("APP_ENV", "test"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }
    AppConfig::from_lookup(move |key| vars.get(key).cloned()).expect("valid test config")
}

pub async fn make_test_router(server: &MockServer) -> axum::Router {
    make_test_router_with(server, &[], Arc::new(ManualClock::new())).await
}

pub async fn make_test_router_with(
    server: &MockServer,
    overrides: &[(&str, &str)],
    clock: Arc<dyn Clock>,
) -> axum::Router {
    let config = test_config(&server.uri(), overrides);
    build_app(&config, clock).expect("router builds")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_body(resp: Response) -> Vec<u8> {
    body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = read_body(resp).await;
    serde_json::from_slice(&bytes).expect("expected valid json body")
}

/// エラーレスポンスの形 (`statusCode`, `statusMessage`, `error`, `message`) を検証する
pub async fn assert_error_response(
    resp: Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");

    let json = read_json(resp).await;
    assert_eq!(json["statusCode"], u64::from(expected_status.as_u16()));
    assert_eq!(json["error"], expected_error, "unexpected error field: {json}");
    let message = json["message"].as_str().unwrap_or("");
    assert!(!message.is_empty(), "expected non-empty message field");
    assert_eq!(json["statusMessage"], json["message"]);
    json
}
