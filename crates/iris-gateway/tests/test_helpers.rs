//! Shared test helpers: test AppState factories and a one-shot request helper.
#![allow(dead_code)] // helpers used across multiple test crates

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use iris_gateway::{create_router, AppState, AuthConfig};
use iris_providers::MockVisionProvider;
use iris_runtime::{
    AnalysisResult, BridgeEndpoint, BridgeResult, CapabilityError, VisionProvider,
};

/// Provider standing in for a host without the vision subsystem
pub struct UnavailableProvider;

#[async_trait]
impl VisionProvider for UnavailableProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn initialize(&self) -> BridgeResult<bool> {
        Err(CapabilityError::unavailable("Vision framework missing"))
    }

    async fn analyze_image(&self, image_path: &str) -> BridgeResult<AnalysisResult> {
        Err(CapabilityError::internal(format!(
            "Failed to read image {}",
            image_path
        )))
    }
}

fn state_with(provider: Arc<dyn VisionProvider>, token: Option<&str>) -> AppState {
    AppState {
        endpoint: BridgeEndpoint::with_provider(provider),
        auth_config: Arc::new(AuthConfig::new(token.map(str::to_string))),
        allowed_origins: vec![],
    }
}

/// Build a test AppState backed by the mock provider, no auth.
pub fn make_test_state() -> AppState {
    state_with(Arc::new(MockVisionProvider::new()), None)
}

/// Build a test AppState with auth enabled using given token.
pub fn make_auth_test_state(token: &str) -> AppState {
    state_with(Arc::new(MockVisionProvider::new()), Some(token))
}

/// Build a test AppState whose provider always fails.
pub fn make_unavailable_state() -> AppState {
    state_with(Arc::new(UnavailableProvider), None)
}

/// Send one request through the router, return (status, body_bytes).
pub async fn call(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let app = create_router(state.clone());

    let mut builder = Request::builder().method(method).uri(uri);
    let req = if let Some(json) = body {
        builder = builder.header("content-type", "application/json");
        builder.body(Body::from(json.to_string())).unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    (status, bytes)
}

/// POST a call to the default channel and parse the JSON reply.
pub async fn invoke(state: &AppState, body: &str) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = call(state, "POST", "/api/v1/channels/ai_service", Some(body)).await;
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}
