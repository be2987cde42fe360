//! Engine client over the Elasticsearch REST API

use super::{
    BulkRequest, BulkResponse, DeleteRequest, EngineClient, EngineFailure, EngineResult,
    GetRequest, SearchHits, SearchRequest, UpdateRequest,
};
use crate::config::EngineConfig;
use crate::document::Document;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Elasticsearch engine reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct SearchResponseBody {
    hits: HitsBody,
}

#[derive(Deserialize)]
struct HitsBody {
    total: TotalHits,
    #[serde(default)]
    hits: Vec<Document>,
}

/// `hits.total` is a plain count before 7.x and an object after.
#[derive(Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Count(u64),
    Object { value: u64 },
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            Self::Count(n) => *n,
            Self::Object { value } => *value,
        }
    }
}

impl HttpEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let base_url = Url::parse(&config.host)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.host, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(config.host.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> EngineResult<Response> {
        let response = request.send().await.map_err(transport_fault)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Option<Value> = response.json().await.ok();
        Err(EngineFailure::from_status(
            status.as_u16(),
            body.as_ref().and_then(error_reason),
        ))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> EngineResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| EngineFailure::deserialization(e.to_string()))
}

fn transport_fault(err: reqwest::Error) -> EngineFailure {
    if err.is_timeout() {
        EngineFailure::request_timeout(err.to_string())
    } else if err.is_decode() {
        EngineFailure::deserialization(err.to_string())
    } else if let Some(status) = err.status() {
        EngineFailure::from_status(status.as_u16(), Some(err.to_string()))
    } else {
        EngineFailure::connection_fault(err.to_string())
    }
}

/// Pull a human-readable reason out of an engine error body.
fn error_reason(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(reason) => Some(reason.clone()),
        Value::Object(detail) => detail
            .get("reason")
            .or_else(|| detail.get("type"))
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

#[async_trait]
impl EngineClient for HttpEngine {
    async fn get_by_id(&self, request: GetRequest) -> EngineResult<Document> {
        let url = self.url(&[&request.index, &request.document_type, &request.id]);
        debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        decode(response).await
    }

    async fn search(&self, request: SearchRequest) -> EngineResult<SearchHits> {
        // An empty path would search every index in the cluster
        if request.index.is_empty() {
            return Err(EngineFailure::from_status(
                400,
                Some("search requires at least one index".to_string()),
            ));
        }

        let url = self.url(&[&request.index.to_path(), "_search"]);
        debug!(
            "POST {} from={} size={} sort={}",
            url,
            request.from,
            request.size,
            request.sort_param()
        );

        let mut params = vec![
            ("from", request.from.to_string()),
            ("size", request.size.to_string()),
            ("sort", request.sort_param()),
        ];
        if let Some(q) = &request.q {
            params.push(("q", q.clone()));
        }

        let mut builder = self.client.post(url).query(&params);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = self.send(builder).await?;
        let body: SearchResponseBody = decode(response).await?;

        Ok(SearchHits {
            total: body.hits.total.value(),
            hits: body.hits.hits,
        })
    }

    async fn bulk_index(&self, request: BulkRequest) -> EngineResult<BulkResponse> {
        if request.is_empty() {
            return Ok(BulkResponse::default());
        }

        let url = self.url(&["_bulk"]);
        debug!("POST {} actions={}", url, request.len());

        let payload = request
            .to_ndjson()
            .map_err(|e| EngineFailure::deserialization(e.to_string()))?;

        let builder = self
            .client
            .post(url)
            .query(&[("refresh", request.refresh.as_str())])
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(payload);

        let response = self.send(builder).await?;
        decode(response).await
    }

    async fn update_by_id(&self, request: UpdateRequest) -> EngineResult<()> {
        let url = self.url(&[
            &request.index,
            &request.document_type,
            &request.id,
            "_update",
        ]);
        debug!("POST {}", url);

        let builder = self
            .client
            .post(url)
            .query(&[("refresh", request.refresh.as_str())])
            .json(&json!({ "doc": request.doc }));

        self.send(builder).await?;
        Ok(())
    }

    async fn delete_by_id(&self, request: DeleteRequest) -> EngineResult<()> {
        let url = self.url(&[&request.index, &request.document_type, &request.id]);
        debug!("DELETE {}", url);

        let builder = self
            .client
            .delete(url)
            .query(&[("refresh", request.refresh.as_str())]);

        self.send(builder).await?;
        Ok(())
    }
}
