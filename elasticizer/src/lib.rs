//! Elasticizer: generic CRUD requests over an Elasticsearch engine
//!
//! This crate translates list/get/create/update/delete requests into
//! engine search, get, bulk, update and delete calls, and maps engine
//! responses and errors back into a uniform [`Envelope`].
//!
//! # Operations
//!
//! - `get_one` - fetch a document by id
//! - `search` - list documents with free-text or structured queries,
//!   pagination and creation-time ordering
//! - `insert_many` - bulk index documents, each naming its own index
//! - `update_one` - partial-document update
//! - `delete_one` - delete by id
//!
//! Logical index names are prefixed with the configured namespace before
//! they reach the engine.

pub mod config;
pub mod date;
pub mod document;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod index;
pub mod normalize;
pub mod request;
pub mod translator;

pub use config::{Config, EngineConfig, MAX_RESULTS, REFRESH_WAIT_FOR};
pub use document::Document;
pub use engine::{EngineClient, EngineFailure, HttpEngine};
pub use envelope::{Envelope, ErrorType};
pub use error::{Error, Result};
pub use index::{IndexResolver, IndexTarget};
pub use request::{JsonRequest, Pagination, Request, SearchQuery, SortOrder};
pub use translator::Elasticizer;
