//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};
use tokio::sync::mpsc;

use verimail::api::AppState;
use verimail::api::app;
use verimail::core::AppConfig;
use verimail::oauth::FlowOutcome;

/// Creates a flow-page router backed by an explicit test config.
pub fn test_app() -> Router {
    test_app_with_base("http://localhost:5000")
}

/// Creates a flow-page router with the KYC API base URL overridden.
pub fn test_app_with_base(api_base_url: &str) -> Router {
    let config = test_config(api_base_url);
    let app_state = AppState::new(config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Creates a flow-page router with an outcome channel attached, the
/// way the connect command wires one up.
pub fn test_app_with_flow(flow: mpsc::Sender<FlowOutcome>) -> Router {
    let config = test_config("http://localhost:5000");
    let app_state = AppState::with_flow(config, flow);
    app(Arc::new(RwLock::new(app_state)))
}

fn test_config(api_base_url: &str) -> AppConfig {
    AppConfig {
        email_username: Some(String::from("kyc-verify@example.com")),
        gmail_app_password: Some(String::from("test-app-password")),
        email_from: None,
        api_base_url: api_base_url.to_string(),
    }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not valid UTF-8")
}
