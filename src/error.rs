// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use serde_json::Value;
use thiserror::Error;

/// Failure of a call to the search cluster.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Request has no target index")]
    MissingIndex,
    #[error("No search cluster hosts configured")]
    NoHosts,
    #[error("Invalid cluster host: {0}")]
    InvalidHost(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("{}", server_message(.status, .body))]
    Server { status: u16, body: String },
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl QueryError {
    /// Stable label for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingIndex => "missing_index",
            Self::NoHosts => "no_hosts",
            Self::InvalidHost(_) => "invalid_host",
            Self::Transport(_) => "transport",
            Self::Server { .. } => "server",
            Self::Decode(_) => "decode",
        }
    }

    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The failure message decoded as JSON.
    ///
    /// Clusters answer errors with a JSON document; anything that doesn't
    /// parse is returned as a JSON string.
    pub fn payload(&self) -> Value {
        let message = self.to_string();
        serde_json::from_str(&message).unwrap_or(Value::String(message))
    }
}

/// The raw body, so [`QueryError::payload`] can decode it. Empty bodies
/// fall back to the status.
fn server_message(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP {} with empty response body", status)
    } else {
        body.to_string()
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
