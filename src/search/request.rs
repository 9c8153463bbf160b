// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! The assembled search request document.
//!
//! Top-level shape:
//!
//! ```text
//! {
//!   "index": "products",
//!   "body": { "query": {...}, "sort": [...], "aggs": {...}, "size": 5 },
//!   "from": 0,
//!   "size": 20,
//!   "_source": false
//! }
//! ```
//!
//! `body` (and each block inside it) is only present when non-empty,
//! `_source` only when source is suppressed. Any other key comes from the
//! caller's base parameters and is left untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outgoing search document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestDocument(Map<String, Value>);

impl RequestDocument {
    pub fn new(params: Map<String, Value>) -> Self {
        Self(params)
    }

    /// Target index, if one was supplied
    pub fn index(&self) -> Option<&str> {
        self.0.get("index").and_then(Value::as_str)
    }

    /// The request body, if any block was assembled
    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.0.get("body").and_then(Value::as_object)
    }

    pub fn from_offset(&self) -> Option<u64> {
        self.0.get("from").and_then(Value::as_u64)
    }

    pub fn page_size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    /// False when the request suppresses `_source`
    pub fn includes_source(&self) -> bool {
        self.0.get("_source").and_then(Value::as_bool).unwrap_or(true)
    }

    /// Scalar top-level parameters other than `index` and `body`.
    ///
    /// These travel as URL query parameters.
    pub fn url_params(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != "index" && key.as_str() != "body")
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), rendered))
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> RequestDocument {
        match value {
            Value::Object(map) => RequestDocument::new(map),
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_accessors() {
        let request = doc(json!({
            "index": "products",
            "body": {"sort": [{"price": {"order": "asc"}}]},
            "from": 40,
            "size": 20,
            "_source": false,
        }));

        assert_eq!(request.index(), Some("products"));
        assert!(request.body().unwrap().contains_key("sort"));
        assert_eq!(request.from_offset(), Some(40));
        assert_eq!(request.page_size(), Some(20));
        assert!(!request.includes_source());
    }

    #[test]
    fn test_defaults_when_absent() {
        let request = RequestDocument::default();
        assert_eq!(request.index(), None);
        assert!(request.body().is_none());
        assert!(request.includes_source());
    }

    #[test]
    fn test_url_params_skip_index_body_and_nested() {
        let request = doc(json!({
            "index": "products",
            "body": {},
            "from": 0,
            "size": 10,
            "_source": false,
            "routing": "eu",
            "stored_fields": ["a", "b"],
        }));

        let mut params = request.url_params();
        params.sort();
        assert_eq!(
            params,
            vec![
                ("_source".to_string(), "false".to_string()),
                ("from".to_string(), "0".to_string()),
                ("routing".to_string(), "eu".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_serializes_transparently() {
        let request = doc(json!({"index": "a", "from": 0}));
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"index": "a", "from": 0}));
    }
}
