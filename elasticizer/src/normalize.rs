//! Engine failures to response envelopes
//!
//! Per-item rejections are always the caller's fault (bad index names,
//! mapping conflicts in supplied documents) and map to 400. Whole-request
//! failures keep the engine's own status.

use crate::engine::{EngineFailure, ItemError};
use crate::envelope::Envelope;
use reqwest::StatusCode;
use serde_json::{json, Value};

pub fn normalize(failure: EngineFailure) -> Envelope {
    match failure {
        EngineFailure::Items(items) => Envelope::new(
            StatusCode::BAD_REQUEST.as_u16(),
            Value::Array(items.into_iter().map(item_body).collect()),
        ),
        EngineFailure::Transport {
            status,
            kind,
            message,
        } => Envelope::new(status, json!({ "type": kind, "message": message })),
    }
}

fn item_body(item: ItemError) -> Value {
    json!({
        "type": item.error_type,
        "message": item.reason,
        "index": item.index,
        "uuid": item.index_uuid,
    })
}
