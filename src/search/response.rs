// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Typed view over a raw search response.
//!
//! The assembler hands back the raw JSON; [`SearchResponse`] is an optional
//! decoding for callers that want hits, totals and aggregation buckets
//! without walking the tree themselves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded `_search` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: Option<Map<String, Value>>,
}

/// The `hits` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count.
///
/// Clusters before 7.0 report a bare number, later ones an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Detailed { value: u64, relation: String },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            Self::Count(n) => *n,
            Self::Detailed { value, .. } => *value,
        }
    }
}

/// A single hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub sort: Option<Vec<Value>>,
}

/// One bucket of a terms aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: Value,
    pub doc_count: u64,
}

impl SearchResponse {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw)
    }

    /// Total matching documents, 0 when the cluster did not report it
    pub fn total(&self) -> u64 {
        self.hits.total.as_ref().map(TotalHits::value).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.hits.hits.is_empty()
    }

    /// Decode every hit's `_source` into `T`, skipping hits without a source.
    pub fn sources<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        self.hits
            .hits
            .iter()
            .filter_map(|hit| hit.source.clone())
            .map(serde_json::from_value)
            .collect()
    }

    /// Buckets of the named terms aggregation, empty if it is absent.
    pub fn buckets(&self, name: &str) -> Vec<Bucket> {
        self.aggregations
            .as_ref()
            .and_then(|aggs| aggs.get(name))
            .and_then(|agg| agg.get("buckets"))
            .and_then(|buckets| serde_json::from_value(buckets.clone()).ok())
            .unwrap_or_default()
    }
}
