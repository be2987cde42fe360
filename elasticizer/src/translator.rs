//! CRUD operations translated into engine requests
//!
//! Every operation resolves to an [`Envelope`]; engine failures are
//! normalized, never propagated.

use crate::config::EngineConfig;
use crate::date;
use crate::document::{CREATED_AT_FIELD, INDEX_FIELD};
use crate::engine::{
    BulkRequest, DeleteRequest, EngineClient, EngineFailure, GetRequest, HttpEngine,
    SearchRequest, UpdateRequest,
};
use crate::envelope::Envelope;
use crate::index::{IndexResolver, IndexTarget};
use crate::normalize::normalize;
use crate::request::{present_id, JsonRequest, Request, SearchQuery};
use crate::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// The translator. Holds configuration and an engine handle, nothing else;
/// safe to share across concurrent requests.
#[derive(Clone)]
pub struct Elasticizer {
    engine: Arc<dyn EngineClient>,
    config: EngineConfig,
    resolver: IndexResolver,
}

impl Elasticizer {
    /// Translator backed by an [`HttpEngine`] pointed at `config.host`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let engine = HttpEngine::new(&config)?;
        Ok(Self::with_engine(config, Arc::new(engine)))
    }

    pub fn with_engine(config: EngineConfig, engine: Arc<dyn EngineClient>) -> Self {
        let resolver = IndexResolver::new(config.prefix.clone());
        Self {
            engine,
            config,
            resolver,
        }
    }

    /// Run one typed request.
    pub async fn handle(&self, request: Request) -> Envelope {
        debug!("Handling {} request", request.operation());
        match request {
            Request::Get { index, id } => self.get_one(&index, &id).await,
            Request::Search { index, query } => self.search(&index, query).await,
            Request::Insert(request) => self.insert_many(request).await,
            Request::Update { index, id, request } => {
                self.update_one(&index, request, id.as_deref()).await
            }
            Request::Delete { index, id } => self.delete_one(&index, id.as_deref()).await,
        }
    }

    /// Retrieve a single document by id.
    pub async fn get_one(&self, index: &str, id: &str) -> Envelope {
        let request = GetRequest {
            index: self.resolver.resolve(index),
            document_type: self.config.document_type.clone(),
            id: id.to_string(),
        };

        match self.engine.get_by_id(request).await {
            Ok(document) => Envelope::ok(document.into_value()),
            Err(failure) => self.fail("get", failure),
        }
    }

    /// List documents of one or more indices, newest first unless the
    /// query asks otherwise.
    pub async fn search(&self, index: &IndexTarget, query: SearchQuery) -> Envelope {
        if index.is_empty() {
            return Envelope::invalid();
        }

        let pagination = query.pagination;
        let request = SearchRequest {
            index: self.resolver.resolve_target(index),
            body: query.body,
            q: query.q,
            from: pagination.from(),
            size: pagination.size(),
            sort: query.sort,
        };

        match self.engine.search(request).await {
            Ok(hits) => {
                let total = hits.total;
                let data: Vec<Value> = hits.hits.into_iter().map(|d| d.into_value()).collect();
                Envelope::ok(json!({
                    "data": data,
                    "hasMore": pagination.has_more(total),
                    "totalCount": total,
                }))
            }
            Err(failure) => self.fail("search", failure),
        }
    }

    /// Index every document of the body in one bulk request. Each document
    /// names its own logical index in `_index`.
    pub async fn insert_many(&self, request: JsonRequest) -> Envelope {
        if !request.is_json() {
            return Envelope::invalid();
        }

        let documents = match request.body {
            Some(Value::Array(documents)) if !documents.is_empty() => documents,
            _ => return Envelope::invalid(),
        };

        let created_at = date::now();
        let mut bulk = BulkRequest::new(&self.config.document_type, &self.config.refresh);

        for document in documents {
            let Value::Object(mut fields) = document else {
                return Envelope::invalid();
            };

            let logical = match fields.remove(INDEX_FIELD) {
                Some(Value::String(name)) => name,
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            fields.insert(
                CREATED_AT_FIELD.to_string(),
                Value::String(created_at.clone()),
            );
            bulk.push(self.resolver.resolve(&logical), fields);
        }

        match self.engine.bulk_index(bulk).await {
            Ok(response) if response.errors => {
                let items = response.item_errors();
                let failure = if items.is_empty() {
                    EngineFailure::from_status(
                        400,
                        Some("bulk request reported errors without item details".to_string()),
                    )
                } else {
                    EngineFailure::Items(items)
                };
                self.fail("insert", failure)
            }
            Ok(_) => Envelope::created(),
            Err(failure) => self.fail("insert", failure),
        }
    }

    /// Merge the supplied fields into an existing document.
    pub async fn update_one(
        &self,
        index: &str,
        request: JsonRequest,
        id: Option<&str>,
    ) -> Envelope {
        if !request.is_json() {
            return Envelope::invalid();
        }

        let mut doc = match request.body {
            Some(Value::Object(fields)) if !fields.is_empty() => fields,
            _ => return Envelope::invalid(),
        };

        let Some(id) = present_id(id) else {
            return Envelope::invalid();
        };

        // A document never moves between indices and keeps its creation time
        doc.remove(INDEX_FIELD);
        doc.remove(CREATED_AT_FIELD);

        let request = UpdateRequest {
            index: self.resolver.resolve(index),
            document_type: self.config.document_type.clone(),
            id: id.to_string(),
            doc,
            refresh: self.config.refresh.clone(),
        };

        match self.engine.update_by_id(request).await {
            Ok(()) => Envelope::ok_empty(),
            Err(failure) => self.fail("update", failure),
        }
    }

    pub async fn delete_one(&self, index: &str, id: Option<&str>) -> Envelope {
        let Some(id) = present_id(id) else {
            return Envelope::missing();
        };

        let request = DeleteRequest {
            index: self.resolver.resolve(index),
            document_type: self.config.document_type.clone(),
            id: id.to_string(),
            refresh: self.config.refresh.clone(),
        };

        match self.engine.delete_by_id(request).await {
            Ok(()) => Envelope::ok_empty(),
            Err(failure) => self.fail("delete", failure),
        }
    }

    fn fail(&self, operation: &str, failure: EngineFailure) -> Envelope {
        warn!(
            "{} failed with status {}: {}",
            operation,
            failure.status(),
            failure
        );
        normalize(failure)
    }
}
