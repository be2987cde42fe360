//! Engine client boundary
//!
//! The translator talks to the search engine only through [`EngineClient`].
//! [`HttpEngine`] implements it over the engine's REST API; tests plug in
//! in-memory implementations.

mod bulk;
mod failure;
mod http;

pub use bulk::{BulkItem, BulkItemResult, BulkRequest, BulkResponse, IndexAction};
pub use failure::{display_name, EngineFailure, ItemError};
pub use http::HttpEngine;

use crate::document::{Document, Fields, CREATED_AT_FIELD};
use crate::index::IndexTarget;
use crate::request::SortOrder;
use async_trait::async_trait;
use serde_json::Value;

pub type EngineResult<T> = std::result::Result<T, EngineFailure>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub index: String,
    pub document_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: IndexTarget,
    pub body: Option<Value>,
    pub q: Option<String>,
    pub from: u64,
    pub size: u64,
    pub sort: SortOrder,
}

impl SearchRequest {
    /// `createdAtUtc:asc` / `createdAtUtc:desc`
    pub fn sort_param(&self) -> String {
        format!("{}:{}", CREATED_AT_FIELD, self.sort.as_str())
    }
}

/// Hits of one search plus the engine's total match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub total: u64,
    pub hits: Vec<Document>,
}

/// Partial-document update; only the supplied fields change.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub index: String,
    pub document_type: String,
    pub id: String,
    pub doc: Fields,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub index: String,
    pub document_type: String,
    pub id: String,
    pub refresh: String,
}

/// The five operations the translator issues against the engine.
///
/// Each call is a single request; implementations own retries, pooling and
/// timeouts.
#[async_trait]
pub trait EngineClient: Send + Sync {
    async fn get_by_id(&self, request: GetRequest) -> EngineResult<Document>;

    async fn search(&self, request: SearchRequest) -> EngineResult<SearchHits>;

    /// Per-item failures are reported in the response, not as an error.
    async fn bulk_index(&self, request: BulkRequest) -> EngineResult<BulkResponse>;

    async fn update_by_id(&self, request: UpdateRequest) -> EngineResult<()>;

    async fn delete_by_id(&self, request: DeleteRequest) -> EngineResult<()>;
}
