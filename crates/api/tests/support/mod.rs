//! Shared helpers for `agrione-server` route tests.

use std::sync::Arc;

use agrione_domain::{Config, ProviderMode};
use agrione_server::{app_router, AppContext};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Router over mock providers: no network, deterministic answers.
pub fn mock_app() -> Router {
    let mut config = Config::default();
    config.providers.mode = ProviderMode::Mock;
    config.retry.base_delay_ms = 1;
    app_router(Arc::new(AppContext::new(config).expect("mock context")))
}

/// Decoded response: status, headers, and JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    TestResponse { status, headers, body }
}

pub async fn post_json(app: Router, path: &str, body: &Value) -> TestResponse {
    let request = Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}
