//! Typed requests accepted by the translator
//!
//! Raw query-string values are parsed here, at the boundary, so the
//! translator only ever sees validated pagination and sort parameters.

use crate::config::MAX_RESULTS;
use crate::index::IndexTarget;
use serde_json::Value;

/// Header/body pair for operations that write documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRequest {
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl JsonRequest {
    pub fn new(content_type: Option<String>, body: Option<Value>) -> Self {
        Self { content_type, body }
    }

    /// Request declaring `application/json` with the given body.
    pub fn json(body: Value) -> Self {
        Self::new(Some("application/json".to_string()), Some(body))
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Page/per-page pair. Each half is kept only if valid: `page >= 0`,
/// `per_page > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    page: Option<u64>,
    per_page: Option<u64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.and_then(|p| u64::try_from(p).ok()),
            per_page: per_page.and_then(|n| u64::try_from(n).ok()).filter(|n| *n > 0),
        }
    }

    /// Parse raw query-string values. Anything that is not an integer is
    /// treated as absent.
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Self {
        let int = |raw: Option<&str>| raw.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(int(page), int(per_page))
    }

    pub fn page(&self) -> Option<u64> {
        self.page
    }

    pub fn per_page(&self) -> Option<u64> {
        self.per_page
    }

    fn both(&self) -> Option<(u64, u64)> {
        self.page.zip(self.per_page)
    }

    /// Offset of the first hit.
    pub fn from(&self) -> u64 {
        self.both()
            .map(|(page, per_page)| page.saturating_mul(per_page))
            .unwrap_or(0)
    }

    /// Number of hits requested; unbounded pages ask for [`MAX_RESULTS`].
    pub fn size(&self) -> u64 {
        self.per_page.unwrap_or(MAX_RESULTS)
    }

    /// Whether matches remain past the current page.
    pub fn has_more(&self, total: u64) -> bool {
        match self.both() {
            Some((page, per_page)) => {
                total > page.saturating_add(1).saturating_mul(per_page)
            }
            None => false,
        }
    }
}

/// Sort direction on the creation timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    /// Newest first
    #[default]
    Descending,
}

impl SortOrder {
    /// Parse the `sortAsc` flag: `true` or `1` sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(flag) if flag == "true" || flag == "1" => Self::Ascending,
            _ => Self::Descending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Search parameters. `body` and `q` are alternative query mechanisms;
/// both are forwarded and the engine decides how they combine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub body: Option<Value>,
    pub q: Option<String>,
    pub pagination: Pagination,
    pub sort: SortOrder,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// The closed set of operations the translator performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get {
        index: String,
        id: String,
    },
    Search {
        index: IndexTarget,
        query: SearchQuery,
    },
    Insert(JsonRequest),
    Update {
        index: String,
        id: Option<String>,
        request: JsonRequest,
    },
    Delete {
        index: String,
        id: Option<String>,
    },
}

impl Request {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Get { .. } => "get",
            Self::Search { .. } => "search",
            Self::Insert(_) => "insert",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Empty identifiers count as missing.
pub fn present_id(id: Option<&str>) -> Option<&str> {
    id.filter(|s| !s.is_empty())
}
