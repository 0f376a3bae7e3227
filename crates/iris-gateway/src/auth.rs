use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Bearer token authentication state
#[derive(Clone)]
pub struct AuthConfig {
    pub api_token: Option<String>,
}

impl AuthConfig {
    pub fn new(api_token: Option<String>) -> Self {
        Self { api_token }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_token.is_some()
    }

    /// Constant-time check of a presented token
    pub fn accepts(&self, token: &str) -> bool {
        match &self.api_token {
            Some(expected) => token.as_bytes().ct_eq(expected.as_bytes()).into(),
            None => true,
        }
    }
}

/// Authentication middleware for channel endpoints
pub async fn auth_middleware(
    auth_config: Arc<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    // Health stays open for liveness probes
    if request.uri().path() == "/health" || !auth_config.is_enabled() {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        if auth_config.accepts(token) {
            return next.run(request).await;
        }
    }

    debug!(path = request.uri().path(), "Rejected unauthenticated request");
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}
