//! Documents as stored in and returned by the engine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open field bag of a document.
pub type Fields = Map<String, Value>;

pub const INDEX_FIELD: &str = "_index";
pub const ID_FIELD: &str = "_id";
/// Injected at insert time, never rewritten afterwards.
pub const CREATED_AT_FIELD: &str = "createdAtUtc";

/// A stored document: engine metadata plus its source fields.
///
/// Deserializes straight from a get response or a search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub fields: Fields,
}

impl Document {
    pub fn new(index: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
            fields,
        }
    }

    pub fn created_at(&self) -> Option<&str> {
        self.fields.get(CREATED_AT_FIELD).and_then(Value::as_str)
    }

    /// Flatten into the caller-facing shape: stored fields with `_index`
    /// and `_id` set from metadata. Metadata wins over a stored field of the
    /// same name.
    pub fn into_value(self) -> Value {
        let mut out = self.fields;
        out.insert(INDEX_FIELD.to_string(), Value::String(self.index));
        out.insert(ID_FIELD.to_string(), Value::String(self.id));
        Value::Object(out)
    }
}
