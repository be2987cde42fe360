//! HTTP request parts to typed translator requests

use axum::http::Method;
use elasticizer::request::present_id;
use elasticizer::{Envelope, IndexTarget, JsonRequest, Pagination, Request, SearchQuery, SortOrder};
use serde_json::Value;
use std::collections::HashMap;

/// Raw pieces of an incoming item request.
pub struct RawRequest<'a> {
    pub method: &'a Method,
    pub index: &'a str,
    pub id: Option<&'a str>,
    pub query: &'a HashMap<String, String>,
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
}

/// Build the typed request, or the envelope rejecting it outright.
pub fn build_request(raw: RawRequest<'_>) -> Result<Request, Envelope> {
    let index = raw.index.to_string();
    let id = present_id(raw.id).map(String::from);

    match *raw.method {
        Method::GET => match id {
            Some(id) => Ok(Request::Get { index, id }),
            None => {
                let target = IndexTarget::parse(raw.index);
                if target.is_empty() {
                    return Err(Envelope::invalid());
                }
                Ok(Request::Search {
                    index: target,
                    query: search_query(raw.query)?,
                })
            }
        },
        Method::POST => Ok(Request::Insert(json_request(raw.content_type, raw.body))),
        Method::PATCH => Ok(Request::Update {
            index,
            id,
            request: json_request(raw.content_type, raw.body),
        }),
        Method::DELETE => Ok(Request::Delete { index, id }),
        _ => Err(Envelope::not_supported(raw.method.as_str())),
    }
}

fn search_query(query: &HashMap<String, String>) -> Result<SearchQuery, Envelope> {
    let body = match query.get("body") {
        Some(raw) => Some(serde_json::from_str::<Value>(raw).map_err(|_| Envelope::invalid())?),
        None => None,
    };

    Ok(SearchQuery {
        body,
        q: query.get("q").cloned(),
        pagination: Pagination::parse(
            query.get("page").map(String::as_str),
            query.get("per_page").map(String::as_str),
        ),
        sort: SortOrder::parse(query.get("sortAsc").map(String::as_str)),
    })
}

/// An unparsable body is treated as no body at all.
fn json_request(content_type: Option<&str>, body: &[u8]) -> JsonRequest {
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(body).ok()
    };
    JsonRequest::new(content_type.map(String::from), body)
}
