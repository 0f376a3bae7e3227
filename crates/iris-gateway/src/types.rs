use axum::http::StatusCode;
use iris_runtime::{BridgeResult, Call, CapabilityError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one method call, as sent to the front end
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodReply {
    Success { result: Value },
    Error { code: ErrorCode, message: String },
}

impl MethodReply {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MethodReply::Success { .. } => StatusCode::OK,
            MethodReply::Error { code, .. } => match code {
                ErrorCode::InvalidArguments => StatusCode::BAD_REQUEST,
                ErrorCode::CapabilityUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodReply::Success { .. })
    }
}

impl From<CapabilityError> for MethodReply {
    fn from(e: CapabilityError) -> Self {
        MethodReply::Error {
            code: e.code,
            message: e.message,
        }
    }
}

impl From<BridgeResult<Value>> for MethodReply {
    fn from(result: BridgeResult<Value>) -> Self {
        match result {
            Ok(result) => MethodReply::Success { result },
            Err(e) => e.into(),
        }
    }
}

/// WebSocket client frame: a call plus a caller-chosen correlation id
#[derive(Debug, Deserialize)]
pub struct ClientFrame {
    #[serde(default)]
    pub id: Value,
    #[serde(flatten)]
    pub call: Call,
}

/// WebSocket server frame
#[derive(Debug, Clone, Serialize)]
pub struct ServerFrame {
    pub id: Value,
    #[serde(flatten)]
    pub reply: MethodReply,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub channel: String,
    pub provider: String,
}
