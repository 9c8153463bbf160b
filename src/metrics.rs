// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for quelastic.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for installing an exporter.
//!
//! # Metric Naming Convention
//! - `quelastic_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `operation`: search, get, decode (response did not match the typed shape)
//! - `status`: success, error
//! - `kind`: see [`QueryError::kind`](crate::QueryError::kind)

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a finished client call
pub fn record_call(operation: &str, status: &str) {
    counter!(
        "quelastic_calls_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record client call latency
pub fn record_latency(operation: &str, duration: Duration) {
    histogram!(
        "quelastic_call_seconds",
        "operation" => operation.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record a failed call by error kind
pub fn record_error(kind: &str) {
    counter!(
        "quelastic_errors_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record number of hits returned by a search
pub fn record_hits(count: usize) {
    histogram!("quelastic_hits").record(count as f64);
}
