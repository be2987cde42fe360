//! In-memory engine clients shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use elasticizer::document::{Document, Fields};
use elasticizer::engine::{
    BulkItem, BulkItemResult, BulkRequest, BulkResponse, DeleteRequest, EngineClient,
    EngineFailure, EngineResult, GetRequest, ItemError, SearchHits, SearchRequest, UpdateRequest,
};
use elasticizer::SortOrder;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Engine keeping documents in memory, with just enough query support to
/// exercise the translator: `field:value` / bare-term `q` strings and
/// `{"query": {"match": {field: value}}}` bodies.
#[derive(Default)]
pub struct MemoryEngine {
    indices: Mutex<HashMap<String, Vec<(String, Fields)>>>,
    next_id: AtomicU64,
    pub searches: Mutex<Vec<SearchRequest>>,
    pub bulks: Mutex<Vec<BulkRequest>>,
    pub updates: Mutex<Vec<UpdateRequest>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document directly, bypassing the translator.
    pub fn seed(&self, index: &str, id: &str, fields: Value) {
        let fields = fields.as_object().cloned().unwrap_or_default();
        self.indices
            .lock()
            .entry(index.to_string())
            .or_default()
            .push((id.to_string(), fields));
    }

    pub fn stored(&self, index: &str, id: &str) -> Option<Fields> {
        self.indices
            .lock()
            .get(index)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, fields)| fields.clone())
    }

    pub fn ids(&self, index: &str) -> Vec<String> {
        self.indices
            .lock()
            .get(index)
            .map(|docs| docs.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default()
    }

    fn not_found() -> EngineFailure {
        EngineFailure::from_status(404, None)
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    }
}

fn field_matches(fields: &Fields, field: &str, term: &str) -> bool {
    let term = term.to_lowercase();
    fields
        .get(field)
        .is_some_and(|value| text_of(value).contains(&term))
}

fn matches_q(fields: &Fields, q: &str) -> bool {
    match q.split_once(':') {
        Some((field, term)) => field_matches(fields, field, term),
        None => {
            let term = q.to_lowercase();
            fields.values().any(|v| text_of(v).contains(&term))
        }
    }
}

fn matches_body(fields: &Fields, body: &Value) -> bool {
    match body.pointer("/query/match").and_then(Value::as_object) {
        Some(clauses) => clauses
            .iter()
            .all(|(field, term)| field_matches(fields, field, &text_of(term))),
        None => true,
    }
}

fn is_valid_index_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('_') && name == name.to_lowercase()
}

#[async_trait]
impl EngineClient for MemoryEngine {
    async fn get_by_id(&self, request: GetRequest) -> EngineResult<Document> {
        self.stored(&request.index, &request.id)
            .map(|fields| Document::new(request.index.clone(), request.id.clone(), fields))
            .ok_or_else(Self::not_found)
    }

    async fn search(&self, request: SearchRequest) -> EngineResult<SearchHits> {
        self.searches.lock().push(request.clone());

        let indices = self.indices.lock();
        let mut matched = Vec::new();
        for name in request.index.names() {
            let docs = indices.get(name).ok_or_else(|| {
                EngineFailure::from_status(404, Some(format!("no such index [{}]", name)))
            })?;
            for (id, fields) in docs {
                let q_ok = request.q.as_deref().map_or(true, |q| matches_q(fields, q));
                let body_ok = request.body.as_ref().map_or(true, |b| matches_body(fields, b));
                if q_ok && body_ok {
                    matched.push(Document::new(name, id.clone(), fields.clone()));
                }
            }
        }

        matched.sort_by(|a, b| match request.sort {
            SortOrder::Ascending => a.created_at().cmp(&b.created_at()),
            SortOrder::Descending => b.created_at().cmp(&a.created_at()),
        });

        let total = matched.len() as u64;
        let hits = matched
            .into_iter()
            .skip(request.from as usize)
            .take(request.size as usize)
            .collect();

        Ok(SearchHits { total, hits })
    }

    async fn bulk_index(&self, request: BulkRequest) -> EngineResult<BulkResponse> {
        self.bulks.lock().push(request.clone());

        let mut indices = self.indices.lock();
        let mut response = BulkResponse::default();

        for action in request.actions {
            if !is_valid_index_name(&action.index) {
                response.errors = true;
                response.items.push(BulkItem {
                    index: Some(BulkItemResult {
                        index: action.index.clone(),
                        id: None,
                        status: 400,
                        error: Some(ItemError {
                            error_type: "invalid_index_name_exception".to_string(),
                            reason: format!(
                                "Invalid index name [{}], must be lowercase",
                                action.index
                            ),
                            index: Some(action.index.clone()),
                            index_uuid: Some("_na_".to_string()),
                        }),
                    }),
                });
                continue;
            }

            let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            indices
                .entry(action.index.clone())
                .or_default()
                .push((id.clone(), action.document));
            response.items.push(BulkItem {
                index: Some(BulkItemResult {
                    index: action.index,
                    id: Some(id),
                    status: 201,
                    error: None,
                }),
            });
        }

        Ok(response)
    }

    async fn update_by_id(&self, request: UpdateRequest) -> EngineResult<()> {
        self.updates.lock().push(request.clone());

        let mut indices = self.indices.lock();
        let fields = indices
            .get_mut(&request.index)
            .and_then(|docs| docs.iter_mut().find(|(id, _)| *id == request.id))
            .map(|(_, fields)| fields)
            .ok_or_else(|| {
                EngineFailure::from_status(
                    404,
                    Some(format!(
                        "[{}][{}]: document missing",
                        request.document_type, request.id
                    )),
                )
            })?;

        for (key, value) in request.doc {
            fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete_by_id(&self, request: DeleteRequest) -> EngineResult<()> {
        let mut indices = self.indices.lock();
        let docs = indices.get_mut(&request.index).ok_or_else(Self::not_found)?;
        let position = docs
            .iter()
            .position(|(id, _)| *id == request.id)
            .ok_or_else(Self::not_found)?;
        docs.remove(position);
        Ok(())
    }
}

/// Engine that fails every call with the same failure.
pub struct FailingEngine {
    pub failure: EngineFailure,
}

impl FailingEngine {
    pub fn new(failure: EngineFailure) -> Self {
        Self { failure }
    }
}

#[async_trait]
impl EngineClient for FailingEngine {
    async fn get_by_id(&self, _request: GetRequest) -> EngineResult<Document> {
        Err(self.failure.clone())
    }

    async fn search(&self, _request: SearchRequest) -> EngineResult<SearchHits> {
        Err(self.failure.clone())
    }

    async fn bulk_index(&self, _request: BulkRequest) -> EngineResult<BulkResponse> {
        Err(self.failure.clone())
    }

    async fn update_by_id(&self, _request: UpdateRequest) -> EngineResult<()> {
        Err(self.failure.clone())
    }

    async fn delete_by_id(&self, _request: DeleteRequest) -> EngineResult<()> {
        Err(self.failure.clone())
    }
}
