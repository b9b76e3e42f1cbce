//! Shared setup for the HTTP tests: a router wired to a mockito processor.

#![allow(dead_code)]

pub use axum::body::Body;
pub use axum::http::{Request, StatusCode};
pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use tower::ServiceExt;

use pix_checkout_relay::app::config::ProcessorConfig;
pub use pix_checkout_relay::Config;
use pix_checkout_relay::{create_router, AppState};

pub const SECRET_KEY: &str = "sk_test_123";
pub const COMPANY_ID: &str = "company-1";
// base64("sk_test_123:")
pub const EXPECTED_AUTH: &str = "Basic c2tfdGVzdF8xMjM6";

pub fn test_config(processor_url: &str) -> Config {
    Config {
        processor: ProcessorConfig {
            base_url: processor_url.to_string(),
            secret_key: SECRET_KEY.to_string(),
            company_id: COMPANY_ID.to_string(),
            timeout_secs: 5,
        },
        ..Config::default()
    }
}

pub fn test_app_with(config: Config) -> axum::Router {
    let state = AppState::from_config(config).expect("failed to build app state");
    create_router(Arc::new(state))
}

pub fn test_app(processor_url: &str) -> axum::Router {
    test_app_with(test_config(processor_url))
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
