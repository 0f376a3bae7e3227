//! Capability error taxonomy.
//!
//! Every failure crossing the bridge is one of these values. None of them is
//! fatal to the process hosting the endpoint.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error class reported back to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or missing call arguments.
    InvalidArguments,
    /// The host lacks the vision subsystem.
    #[serde(rename = "VISION_NOT_AVAILABLE")]
    CapabilityUnavailable,
    /// Unexpected provider fault, e.g. an unreadable image.
    InternalFailure,
    /// The method name is not registered on the channel.
    NotImplemented,
}

impl ErrorCode {
    /// Code string as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArguments => "INVALID_ARGUMENTS",
            ErrorCode::CapabilityUnavailable => "VISION_NOT_AVAILABLE",
            ErrorCode::InternalFailure => "INTERNAL_FAILURE",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct CapabilityError {
    pub code: ErrorCode,
    pub message: String,
}

impl CapabilityError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArguments, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CapabilityUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalFailure, message)
    }

    pub fn not_implemented(method: &str) -> Self {
        Self::new(
            ErrorCode::NotImplemented,
            format!("Method not implemented: {}", method),
        )
    }
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, CapabilityError>;
