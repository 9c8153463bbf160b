//! Failure Handling Tests for Quelastic
//!
//! Injects client failures at precise call counts and checks the failure
//! path: warning log, error report, metrics, `Err` to the caller.
//!
//! # Running
//! ```bash
//! cargo test --test chaos -- --nocapture
//! ```

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing_subscriber::fmt::MakeWriter;

use quelastic::{
    ErrorReporter, MemoryReporter, QueryAssembler, QueryError, RequestDocument, SearchClient,
};

// =============================================================================
// Failing Client - Precise Error Injection
// =============================================================================

/// Client that fails on the given call numbers (1-indexed) and answers an
/// empty hit list otherwise.
pub struct FailingClient {
    call_count: AtomicU64,
    fail_on_calls: Vec<u64>,
    error_msg: String,
    requests: Mutex<Vec<RequestDocument>>,
}

impl FailingClient {
    pub fn new(fail_on_calls: Vec<u64>, error_msg: &str) -> Self {
        Self {
            call_count: AtomicU64::new(0),
            fail_on_calls,
            error_msg: error_msg.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always(error_msg: &str) -> Self {
        Self::new((1..=1000).collect(), error_msg)
    }

    fn maybe_fail(&self) -> Result<(), QueryError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_calls.contains(&count) {
            Err(QueryError::Transport(self.error_msg.clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SearchClient for FailingClient {
    async fn search(&self, request: &RequestDocument) -> Result<Value, QueryError> {
        self.requests.lock().push(request.clone());
        self.maybe_fail()?;
        Ok(json!({"hits": {"total": {"value": 0, "relation": "eq"}, "hits": []}}))
    }

    async fn get(&self, index: &str, id: &str) -> Result<Value, QueryError> {
        self.maybe_fail()?;
        Ok(json!({"_index": index, "_id": id, "found": false}))
    }
}

/// Reporter that counts captures.
#[derive(Default)]
struct CountingReporter(AtomicU64);

impl ErrorReporter for CountingReporter {
    fn capture(&self, _error: &QueryError) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Log Capture
// =============================================================================

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

// =============================================================================
// Failure Scenarios
// =============================================================================

#[tokio::test]
async fn failure_execute_logs_reports_and_returns_err() {
    let (logs, _guard) = capture_logs();
    let reporter = Arc::new(CountingReporter::default());
    let assembler = QueryAssembler::new(Arc::new(FailingClient::always("connection refused")))
        .with_reporter(reporter.clone())
        .index("products")
        .where_equals("status", "active");

    let result = assembler.execute().await;

    assert!(matches!(result, Err(QueryError::Transport(ref m)) if m == "connection refused"));
    assert_eq!(reporter.0.load(Ordering::SeqCst), 1);
    let logged = logs.contents();
    assert!(logged.contains("WARN"), "expected a warning, got: {}", logged);
    assert!(logged.contains("connection refused"), "expected the message, got: {}", logged);
}

#[tokio::test]
async fn failure_lookup_logs_and_reports() {
    let (logs, _guard) = capture_logs();
    let reporter = Arc::new(MemoryReporter::new());
    let assembler = QueryAssembler::new(Arc::new(FailingClient::always("node down")))
        .with_reporter(reporter.clone())
        .index("products");

    assert!(assembler.lookup_by_id("7").await.is_err());
    assert_eq!(reporter.messages(), vec!["Transport error: node down".to_string()]);
    assert!(logs.contents().contains("node down"));
}

#[tokio::test]
async fn failure_is_distinguishable_from_empty_result() {
    // Second call fails, first and third succeed with zero hits
    let client = Arc::new(FailingClient::new(vec![2], "timeout"));
    let assembler = QueryAssembler::new(client.clone()).index("products");

    let first = assembler.execute().await;
    let second = assembler.execute().await;
    let third = assembler.execute().await;

    assert_eq!(first.unwrap()["hits"]["hits"], json!([]));
    assert!(second.is_err());
    assert!(third.is_ok());
    assert_eq!(client.requests.lock().len(), 3);
}

#[tokio::test]
async fn failure_does_not_disturb_builder_state() {
    let client = Arc::new(FailingClient::new(vec![1], "flaky"));
    let assembler = QueryAssembler::new(client.clone())
        .index("products")
        .where_in("tag", vec!["a", "b"])
        .order_by_desc("created_at");

    assert!(assembler.execute().await.is_err());
    assert!(assembler.execute().await.is_ok());

    let requests = client.requests.lock();
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn failure_fetch_results_skips_transform() {
    let assembler = QueryAssembler::new(Arc::new(FailingClient::always("gone"))).index("products");

    let result = assembler
        .fetch_results(|_| -> usize { panic!("transform must not run on failure") })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn happy_success_produces_no_warning() {
    let (logs, _guard) = capture_logs();
    let reporter = Arc::new(MemoryReporter::new());
    let assembler = QueryAssembler::new(Arc::new(FailingClient::new(vec![], "")))
        .with_reporter(reporter.clone())
        .index("products");

    assert!(assembler.execute().await.is_ok());
    assert!(reporter.is_empty());
    assert!(!logs.contents().contains("WARN"));
}
