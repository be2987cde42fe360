//! Item routes: `/`, `/{index}` and `/{index}/{id}` for every method

use crate::adapter::{build_request, RawRequest};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use elasticizer::config::ServerConfig;
use elasticizer::{Elasticizer, Envelope};
use serde_json::json;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub elasticizer: Arc<Elasticizer>,
}

/// Create the item router
///
/// Routes are nested under `server.base_path` when it is set. The bare root
/// takes inserts, where every document names its own `_index`.
pub fn router(elasticizer: Arc<Elasticizer>, server: &ServerConfig) -> Router {
    let items = Router::new()
        .route("/", any(item_handler))
        .route("/:index", any(item_handler))
        .route("/:index/:id", any(item_handler))
        .with_state(AppState { elasticizer });

    let base_path = server.base_path.trim_matches('/');
    let app = if base_path.is_empty() {
        items
    } else {
        Router::new().nest(&format!("/{}", base_path), items)
    };

    app.layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

async fn item_handler(
    State(state): State<AppState>,
    method: Method,
    params: Option<Path<HashMap<String, String>>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let params = params.map(|Path(params)| params).unwrap_or_default();
    let raw = RawRequest {
        method: &method,
        index: params.get("index").map(String::as_str).unwrap_or_default(),
        id: params.get("id").map(String::as_str),
        query: &query,
        content_type: headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        body: &body,
    };

    let envelope = match build_request(raw) {
        Ok(request) => state.elasticizer.handle(request).await,
        Err(rejected) => rejected,
    };

    envelope_response(envelope)
}

/// Envelope status becomes the HTTP status; anything unrepresentable is a 500.
pub fn envelope_response(envelope: Envelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope.body)).into_response()
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };
    tracing::error!("Request handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": message })),
    )
        .into_response()
}
