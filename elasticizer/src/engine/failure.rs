//! Failure shapes reported by the engine

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Per-item error from a bulk (or shard-level) response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub index_uuid: Option<String>,
}

/// Every way an engine operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineFailure {
    /// The request was accepted but individual items were rejected
    #[error("{} item(s) rejected by the engine", .0.len())]
    Items(Vec<ItemError>),

    /// The request as a whole failed
    #[error("{kind} ({status}): {message}")]
    Transport {
        status: u16,
        kind: String,
        message: String,
    },
}

impl EngineFailure {
    pub fn transport(status: u16, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Failure for an HTTP status reported by the engine
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown Error")
                .to_string()
        });
        Self::transport(status, display_name(status), message)
    }

    /// No connection could be made to the engine
    pub fn connection_fault(message: impl Into<String>) -> Self {
        Self::transport(
            StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            "ConnectionFault",
            message,
        )
    }

    /// The transport gave up waiting on the engine
    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self::transport(
            StatusCode::REQUEST_TIMEOUT.as_u16(),
            "RequestTimeout",
            message,
        )
    }

    /// The engine answered with something that could not be decoded
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::transport(StatusCode::BAD_GATEWAY.as_u16(), "Deserialization", message)
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Items(_) => StatusCode::BAD_REQUEST.as_u16(),
            Self::Transport { status, .. } => *status,
        }
    }
}

/// Error class name for an engine HTTP status.
pub fn display_name(status: u16) -> &'static str {
    match status {
        400 => "BadRequest",
        401 => "AuthenticationException",
        403 => "AuthorizationException",
        404 => "NotFound",
        405 => "MethodNotAllowed",
        408 => "RequestTimeout",
        409 => "Conflict",
        413 => "RequestEntityTooLarge",
        429 => "TooManyRequests",
        500 => "InternalServerError",
        501 => "NotImplemented",
        502 => "BadGateway",
        503 => "ServiceUnavailable",
        504 => "GatewayTimeout",
        _ => "Generic",
    }
}
