//! Bulk index requests and responses

use super::failure::ItemError;
use crate::document::Fields;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One index action: the target physical index and the document to write.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAction {
    pub index: String,
    pub document: Fields,
}

/// A single engine request carrying many independent index actions.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    pub document_type: String,
    pub refresh: String,
    pub actions: Vec<IndexAction>,
}

impl BulkRequest {
    pub fn new(document_type: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            refresh: refresh.into(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, index: impl Into<String>, document: Fields) {
        self.actions.push(IndexAction {
            index: index.into(),
            document,
        });
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Encode as newline-delimited JSON: an action line followed by the
    /// document line, per action, with a trailing newline.
    pub fn to_ndjson(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for action in &self.actions {
            let meta = json!({
                "index": {
                    "_index": action.index,
                    "_type": self.document_type,
                }
            });
            out.push_str(&serde_json::to_string(&meta)?);
            out.push('\n');
            out.push_str(&serde_json::to_string(&action.document)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Bulk response as reported by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<BulkItemResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

impl BulkResponse {
    /// Errors of the index actions that failed, in request order.
    pub fn item_errors(&self) -> Vec<ItemError> {
        self.items
            .iter()
            .filter_map(|item| item.index.as_ref())
            .filter_map(|result| result.error.clone())
            .collect()
    }
}
