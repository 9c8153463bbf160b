// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search cluster clients.
//!
//! The assembler talks to the cluster through [`SearchClient`], so the
//! transport can be swapped (HTTP, in-process mock) without touching query
//! construction. A client handle is shared across assemblers via `Arc`.

mod http;

pub use http::HttpSearchClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::QueryError;
use crate::search::RequestDocument;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run a search request and return the raw response.
    async fn search(&self, request: &RequestDocument) -> Result<Value, QueryError>;

    /// Fetch a single document by id.
    async fn get(&self, index: &str, id: &str) -> Result<Value, QueryError>;
}
