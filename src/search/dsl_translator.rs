// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query DSL Translator
//!
//! Translates the clause AST to Elasticsearch query-DSL JSON.
//!
//! # Query DSL Shapes
//!
//! ```text
//! {"term": {"status": "active"}}                      - Exact match
//! {"bool": {"must_not": {"term": {...}}}}             - Negated match
//! {"terms": {"tags": ["a", "b"]}}                     - Set membership
//! {"range": {"age": {"gte": 18}}}                     - Comparison
//! {"wildcard": {"name": "*ali*"}}                     - Contains
//! {"exists": {"field": "email"}}                      - Presence
//! {"multi_match": {"query": "a b", "fields": [...]}}  - Free text
//! ```

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::clause::{BoolQuery, Clause, SortDirective, TermsAggregation};

/// Painless expression scoring 1 when the field holds the wanted value.
const VALUE_FIRST_SCRIPT: &str = "doc[params.fieldParam].value == params.valueParam ? 1 : 0";

/// Query DSL translator
pub struct DslTranslator;

impl DslTranslator {
    /// Translate a single clause.
    pub fn translate_clause(clause: &Clause) -> Value {
        match clause {
            Clause::Term { field, value } => json!({ "term": { field: value } }),
            Clause::NotTerm { field, value } => json!({
                "bool": { "must_not": { "term": { field: value } } }
            }),
            Clause::Terms { field, values } => json!({ "terms": { field: values } }),
            Clause::Range {
                field,
                operator,
                value,
            } => json!({ "range": { field: { operator.as_str(): value } } }),
            Clause::Wildcard { field, pattern } => {
                json!({ "wildcard": { field: format!("*{}*", pattern) } })
            }
            Clause::Exists { field } => json!({ "exists": { "field": field } }),
            Clause::NotExists { field } => json!({
                "bool": { "must_not": { "exists": { "field": field } } }
            }),
            Clause::MultiMatch { query, fields } => json!({
                "multi_match": { "query": query, "fields": fields }
            }),
            Clause::Raw(fragment) => fragment.clone(),
        }
    }

    /// Translate the bool buckets to `{"bool": {...}}`.
    ///
    /// Only non-empty buckets appear in the output.
    pub fn translate_bool(query: &BoolQuery) -> Value {
        let mut buckets = Map::new();
        for (name, clauses) in [
            ("filter", &query.filter),
            ("must", &query.must),
            ("should", &query.should),
        ] {
            if !clauses.is_empty() {
                let translated = clauses.iter().map(Self::translate_clause).collect();
                buckets.insert(name.to_string(), Value::Array(translated));
            }
        }
        json!({ "bool": buckets })
    }

    pub fn translate_sort(directive: &SortDirective) -> Value {
        match directive {
            SortDirective::Field { field, order } => json!({ field: { "order": order.as_str() } }),
            SortDirective::ValueFirst { field, value } => json!({
                "_script": {
                    "script": {
                        "lang": "painless",
                        "source": VALUE_FIRST_SCRIPT,
                        "params": { "fieldParam": field, "valueParam": value },
                    },
                    "type": "number",
                    "order": "desc",
                }
            }),
        }
    }

    pub fn translate_aggregations(aggs: &BTreeMap<String, TermsAggregation>) -> Value {
        let translated: Map<String, Value> = aggs
            .iter()
            .map(|(name, agg)| {
                (
                    name.clone(),
                    json!({ "terms": { "field": agg.field, "size": agg.size } }),
                )
            })
            .collect();
        Value::Object(translated)
    }
}
