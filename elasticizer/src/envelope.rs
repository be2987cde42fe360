//! Uniform response envelope returned by every translator operation

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error categories reported for requests rejected before reaching the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Header or body failed a shape check
    Invalid,
    /// A required identifier was not supplied
    Missing,
    /// HTTP method outside the supported set
    NotSupported,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Missing => "missing",
            Self::NotSupported => "not_supported",
        }
    }
}

/// `{status, body}` pair handed back to the HTTP adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    pub body: Value,
}

impl Envelope {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK.as_u16(), body)
    }

    /// 200 with `{}`
    pub fn ok_empty() -> Self {
        Self::ok(json!({}))
    }

    /// 201 with `{}`
    pub fn created() -> Self {
        Self::new(StatusCode::CREATED.as_u16(), json!({}))
    }

    pub fn invalid() -> Self {
        Self::rejected(ErrorType::Invalid)
    }

    pub fn missing() -> Self {
        Self::rejected(ErrorType::Missing)
    }

    fn rejected(error_type: ErrorType) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST.as_u16(),
            json!({ "type": error_type.as_str() }),
        )
    }

    pub fn not_supported(method: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED.as_u16(),
            json!({
                "error": {
                    "type": ErrorType::NotSupported.as_str(),
                    "message": format!("Method {} not supported.", method),
                }
            }),
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections() {
        assert_eq!(
            Envelope::invalid(),
            Envelope::new(400, json!({"type": "invalid"}))
        );
        assert_eq!(
            Envelope::missing(),
            Envelope::new(400, json!({"type": "missing"}))
        );
    }

    #[test]
    fn test_not_supported_message() {
        let envelope = Envelope::not_supported("PUT");
        assert_eq!(envelope.status, 405);
        assert_eq!(
            envelope.body,
            json!({"error": {"type": "not_supported", "message": "Method PUT not supported."}})
        );
    }

    #[test]
    fn test_success_range() {
        assert!(Envelope::created().is_success());
        assert!(Envelope::ok_empty().is_success());
        assert!(!Envelope::invalid().is_success());
    }

    #[test]
    fn test_error_type_serde() {
        assert_eq!(
            serde_json::to_value(ErrorType::NotSupported).unwrap(),
            json!("not_supported")
        );
    }
}
