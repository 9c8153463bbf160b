// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Error reporting collaborators.
//!
//! Every failed client call is forwarded to an [`ErrorReporter`] in addition
//! to the warning log. Reporting is fire-and-forget: reporters must not fail
//! or block.

use parking_lot::Mutex;

use crate::error::QueryError;
use crate::metrics;

/// Receives every failed client call.
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &QueryError);
}

/// Discards reports. Used when no reporter is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn capture(&self, _error: &QueryError) {}
}

/// Counts reports by error kind (`quelastic_errors_total`).
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsReporter;

impl ErrorReporter for MetricsReporter {
    fn capture(&self, error: &QueryError) {
        metrics::record_error(error.kind());
    }
}

/// Keeps reported error messages in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    captured: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.captured.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured.lock().is_empty()
    }
}

impl ErrorReporter for MemoryReporter {
    fn capture(&self, error: &QueryError) {
        self.captured.lock().push(error.to_string());
    }
}
