// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the query assembler and its HTTP client.
//!
//! # Example
//!
//! ```
//! use quelastic::QuelasticConfig;
//!
//! // Minimal config (uses defaults)
//! let config = QuelasticConfig::default();
//! assert_eq!(config.hosts, vec!["http://localhost:9200".to_string()]);
//! assert_eq!(config.default_page_size, 20);
//!
//! // Full config
//! let config = QuelasticConfig {
//!     hosts: vec!["http://es-1:9200".into(), "http://es-2:9200".into()],
//!     debug: false,
//!     request_timeout_ms: 5_000,
//!     ..Default::default()
//! };
//! ```

use std::env;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding comma-separated cluster hosts
pub const HOSTS_ENV: &str = "QUELASTIC_HOSTS";
/// Environment variable enabling the debug halt on failed calls
pub const DEBUG_ENV: &str = "APP_DEBUG";
/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "QUELASTIC_TIMEOUT_MS";

/// Configuration for the query assembler.
///
/// All fields have defaults. Passed explicitly to constructors; nothing is
/// read from the process environment unless [`QuelasticConfig::from_env`]
/// is called.
#[derive(Debug, Clone, Deserialize)]
pub struct QuelasticConfig {
    /// Cluster host addresses (e.g., "http://localhost:9200")
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,

    /// Halt and dump the decoded failure payload on failed calls.
    /// Development aid only.
    #[serde(default)]
    pub debug: bool,

    /// Per-request timeout (default: 30s)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Page size a new assembler starts with
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

fn default_hosts() -> Vec<String> { vec!["http://localhost:9200".to_string()] }
fn default_request_timeout_ms() -> u64 { 30_000 }
fn default_page_size() -> u64 { 20 }

impl Default for QuelasticConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
            debug: false,
            request_timeout_ms: default_request_timeout_ms(),
            default_page_size: default_page_size(),
        }
    }
}

impl QuelasticConfig {
    /// Build a config from `QUELASTIC_HOSTS`, `APP_DEBUG` and
    /// `QUELASTIC_TIMEOUT_MS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(hosts) = lookup(HOSTS_ENV) {
            let hosts: Vec<String> = hosts
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect();
            if !hosts.is_empty() {
                config.hosts = hosts;
            }
        }

        if let Some(debug) = lookup(DEBUG_ENV) {
            config.debug = matches!(debug.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV).and_then(|t| t.trim().parse().ok()) {
            config.request_timeout_ms = timeout;
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
