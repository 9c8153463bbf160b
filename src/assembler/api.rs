// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Calling operations for QueryAssembler
//!
//! Every call to the cluster goes through the same failure path:
//!
//! ```text
//! client call fails
//!       │
//!       ├─→ warn! with the error message
//!       ├─→ ErrorReporter::capture
//!       ├─→ quelastic_calls_total{status="error"}
//!       │
//!       └─→ debug switch? dump decoded payload and halt
//!                │
//!                └─→ otherwise Err(QueryError) to the caller
//! ```
//!
//! Callers that want the old "absent on failure" shape can use `.ok()`.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::QueryError;
use crate::metrics;
use crate::search::SearchResponse;

use super::QueryAssembler;

impl QueryAssembler {
    /// Assemble the request and run it against the cluster.
    pub async fn execute(&self) -> Result<Value, QueryError> {
        let request = self.build_request();
        let start = Instant::now();

        let result = match request.index() {
            Some(index) => {
                debug!(index = %index, from = ?request.from_offset(), size = ?request.page_size(), "Dispatching search");
                self.client.search(&request).await
            }
            None => Err(QueryError::MissingIndex),
        };

        metrics::record_latency("search", start.elapsed());
        match result {
            Ok(response) => {
                metrics::record_call("search", "success");
                if let Some(hits) = response.pointer("/hits/hits").and_then(Value::as_array) {
                    metrics::record_hits(hits.len());
                }
                Ok(response)
            }
            Err(e) => Err(self.fail("search", e)),
        }
    }

    /// Fetch one document by id from the base parameters' index.
    pub async fn lookup_by_id(&self, id: &str) -> Result<Value, QueryError> {
        let start = Instant::now();

        let result = match self.base_parameters.get("index").and_then(Value::as_str) {
            Some(index) => {
                debug!(index = %index, id = %id, "Fetching document");
                self.client.get(index, id).await
            }
            None => Err(QueryError::MissingIndex),
        };

        metrics::record_latency("get", start.elapsed());
        match result {
            Ok(document) => {
                metrics::record_call("get", "success");
                Ok(document)
            }
            Err(e) => Err(self.fail("get", e)),
        }
    }

    /// Execute, then map the raw response through `transform`.
    pub async fn fetch_results<T, F>(&self, transform: F) -> Result<T, QueryError>
    where
        F: FnOnce(Value) -> T,
    {
        self.execute().await.map(transform)
    }

    /// Execute and decode the response into a [`SearchResponse`].
    pub async fn fetch_typed(&self) -> Result<SearchResponse, QueryError> {
        let raw = self.execute().await?;
        // The search itself already counted as a success
        SearchResponse::from_value(raw).map_err(|e| self.fail("decode", QueryError::Decode(e.to_string())))
    }

    /// Shared failure path: log, report, count, and halt in debug mode.
    fn fail(&self, operation: &str, e: QueryError) -> QueryError {
        warn!(operation = %operation, kind = e.kind(), status = ?e.status(), "Search client call failed: {}", e);
        self.reporter.capture(&e);
        metrics::record_call(operation, "error");

        if self.debug {
            let payload = e.payload();
            let dump = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
            error!(operation = %operation, payload = %dump, "Debug mode: halting on failed call");
            panic!("{} failed: {}", operation, dump);
        }

        e
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use parking_lot::Mutex;
    use serde_json::json;

    use crate::client::SearchClient;
    use crate::reporting::MemoryReporter;
    use crate::search::RequestDocument;

    use super::*;

    #[derive(Default)]
    struct ScriptedClient {
        fail_with: Option<String>,
        seen: Mutex<Vec<RequestDocument>>,
    }

    #[async_trait]
    impl SearchClient for ScriptedClient {
        async fn search(&self, request: &RequestDocument) -> Result<Value, QueryError> {
            self.seen.lock().push(request.clone());
            match &self.fail_with {
                Some(body) => Err(QueryError::Server { status: 400, body: body.clone() }),
                None => Ok(json!({"hits": {"total": {"value": 1, "relation": "eq"}, "hits": [
                    {"_index": "products", "_id": "1", "_score": 1.0, "_source": {"name": "lamp"}}
                ]}})),
            }
        }

        async fn get(&self, index: &str, id: &str) -> Result<Value, QueryError> {
            match &self.fail_with {
                Some(body) => Err(QueryError::Server { status: 404, body: body.clone() }),
                None => Ok(json!({"_index": index, "_id": id, "found": true})),
            }
        }
    }

    fn failing(body: &str) -> Arc<ScriptedClient> {
        Arc::new(ScriptedClient {
            fail_with: Some(body.to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_execute_dispatches_built_request() {
        let client = Arc::new(ScriptedClient::default());
        let assembler = QueryAssembler::new(client.clone())
            .index("products")
            .where_equals("status", "active");

        let response = assembler.execute().await.unwrap();
        assert_eq!(response["hits"]["hits"][0]["_id"], json!("1"));

        let seen = client.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], assembler.build_request());
    }

    #[tokio::test]
    async fn test_execute_failure_is_reported() {
        let reporter = Arc::new(MemoryReporter::new());
        let assembler = QueryAssembler::new(failing(r#"{"error":"boom"}"#))
            .with_reporter(reporter.clone())
            .index("products");

        let err = assembler.execute().await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(reporter.messages(), vec![r#"{"error":"boom"}"#.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_index_goes_through_failure_path() {
        let client = Arc::new(ScriptedClient::default());
        let reporter = Arc::new(MemoryReporter::new());
        let assembler = QueryAssembler::new(client.clone()).with_reporter(reporter.clone());

        assert!(matches!(assembler.execute().await, Err(QueryError::MissingIndex)));
        assert!(matches!(assembler.lookup_by_id("1").await, Err(QueryError::MissingIndex)));
        assert_eq!(reporter.len(), 2);
        assert!(client.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let assembler = QueryAssembler::new(Arc::new(ScriptedClient::default())).index("products");
        let document = assembler.lookup_by_id("42").await.unwrap();
        assert_eq!(document, json!({"_index": "products", "_id": "42", "found": true}));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_reported() {
        let reporter = Arc::new(MemoryReporter::new());
        let assembler = QueryAssembler::new(failing("not found"))
            .with_reporter(reporter.clone())
            .index("products");

        assert!(assembler.lookup_by_id("42").await.is_err());
        assert_eq!(reporter.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_results_applies_transform() {
        let assembler = QueryAssembler::new(Arc::new(ScriptedClient::default())).index("products");
        let count = assembler
            .fetch_results(|raw| raw["hits"]["hits"].as_array().map(Vec::len).unwrap_or(0))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_fetch_typed() {
        let assembler = QueryAssembler::new(Arc::new(ScriptedClient::default())).index("products");
        let response = assembler.fetch_typed().await.unwrap();
        assert_eq!(response.total(), 1);
        assert_eq!(response.hits.hits[0].id, "1");
    }

    /// Answers every search with a body that is not a search response.
    struct MalformedClient;

    #[async_trait]
    impl SearchClient for MalformedClient {
        async fn search(&self, _request: &RequestDocument) -> Result<Value, QueryError> {
            Ok(json!({"hits": {"hits": "not a list"}}))
        }

        async fn get(&self, _index: &str, _id: &str) -> Result<Value, QueryError> {
            Ok(json!({}))
        }
    }

    #[test]
    fn test_decode_failure_counted_apart_from_search() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let reporter = Arc::new(MemoryReporter::new());
        let assembler = QueryAssembler::new(Arc::new(MalformedClient))
            .with_reporter(reporter.clone())
            .index("products");

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = ::metrics::with_local_recorder(&recorder, || runtime.block_on(assembler.fetch_typed()));
        assert!(matches!(result, Err(QueryError::Decode(_))));
        assert_eq!(reporter.len(), 1);

        let mut calls: Vec<(String, String, DebugValue)> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, _, _, _)| key.key().name() == "quelastic_calls_total")
            .map(|(key, _, _, value)| {
                let label = |name: &str| {
                    key.key()
                        .labels()
                        .find(|l| l.key() == name)
                        .map(|l| l.value().to_string())
                        .unwrap_or_default()
                };
                (label("operation"), label("status"), value)
            })
            .collect();
        calls.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

        assert_eq!(
            calls,
            vec![
                ("decode".to_string(), "error".to_string(), DebugValue::Counter(1)),
                ("search".to_string(), "success".to_string(), DebugValue::Counter(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_ok_yields_absent() {
        let assembler = QueryAssembler::new(failing("boom")).index("products");
        assert!(assembler.execute().await.ok().is_none());
    }

    #[tokio::test]
    #[should_panic(expected = "parsing_exception")]
    async fn test_debug_mode_halts_with_payload() {
        let assembler = QueryAssembler::new(failing(r#"{"error":{"type":"parsing_exception"}}"#))
            .index("products")
            .debug(true);
        let _ = assembler.execute().await;
    }
}
