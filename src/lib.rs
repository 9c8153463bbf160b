// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # Quelastic
//!
//! A fluent query assembler for Elasticsearch-compatible search clusters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      QueryAssembler                         │
//! │  • where_* / exists / wildcard / raw_filter → bool buckets  │
//! │  • order_by / sort_by_field_value → sort                    │
//! │  • aggregate_terms → aggs                                   │
//! │  • paginate / set_page_size / without_source                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                     (build_request via DslTranslator)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      RequestDocument                        │
//! │  { index, body: { query, sort, aggs }, from, size, _source }│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                     (execute / lookup_by_id)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SearchClient (Arc, shared)                  │
//! │  • HttpSearchClient: reqwest over configured hosts         │
//! │  • failures → warn! + ErrorReporter + metrics              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quelastic::{HttpSearchClient, MetricsReporter, QueryAssembler, QuelasticConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quelastic::QueryError> {
//!     let config = QuelasticConfig {
//!         hosts: vec!["http://localhost:9200".into()],
//!         ..Default::default()
//!     };
//!     let client = Arc::new(HttpSearchClient::new(&config)?);
//!
//!     let results = QueryAssembler::with_config(client, &config)
//!         .with_reporter(Arc::new(MetricsReporter))
//!         .index("articles")
//!         .where_equals("published", true)
//!         .where_keywords("rust search", ["title^3", "body"], true)
//!         .order_by_desc("published_at")
//!         .paginate(0, Some(10))
//!         .fetch_typed()
//!         .await?;
//!
//!     println!("{} matching articles", results.total());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Handling
//!
//! Calls return `Result<_, QueryError>`. Every failure is also logged as a
//! `tracing` warning and forwarded to the configured [`ErrorReporter`]. With
//! [`QuelasticConfig::debug`] set, a failed call dumps the decoded error
//! payload and panics.
//!
//! ## Modules
//!
//! - [`assembler`]: The [`QueryAssembler`] builder and its calling operations
//! - [`search`]: Clause AST, DSL translation, request/response documents
//! - [`client`]: The [`SearchClient`] seam and its HTTP implementation
//! - [`reporting`]: Error reporting collaborators
//! - [`config`]: Host list, debug switch, timeouts

pub mod assembler;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod reporting;
pub mod search;

pub use assembler::QueryAssembler;
pub use client::{HttpSearchClient, SearchClient};
pub use config::QuelasticConfig;
pub use error::QueryError;
pub use reporting::{ErrorReporter, MemoryReporter, MetricsReporter, NoopReporter};
pub use search::{
    Clause, RangeOperator, RequestDocument, SearchResponse, SortDirective, SortOrder,
    TermsAggregation,
};
