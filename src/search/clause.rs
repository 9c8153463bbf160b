// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Clause AST for search requests
//!
//! Provides a typed model of the query-DSL fragments the assembler
//! accumulates. The model is translated to JSON by
//! [`DslTranslator`](super::DslTranslator).
//!
//! # Example
//!
//! ```rust
//! use quelastic::search::{BoolQuery, Clause, RangeOperator};
//!
//! let mut query = BoolQuery::default();
//! query.filter.push(Clause::term("status", "active"));
//! query.filter.push(Clause::range("age", RangeOperator::Gte, 18));
//! query.should.push(Clause::multi_match("rust search", vec!["title^3".into(), "body".into()]));
//!
//! assert_eq!(query.filter.len(), 2);
//! assert!(query.must.is_empty());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One boolean-query condition fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// Exact match: `{term: {field: value}}`
    Term { field: String, value: Value },
    /// Negated exact match: `{bool: {must_not: {term: ...}}}`
    NotTerm { field: String, value: Value },
    /// Set membership: `{terms: {field: [values]}}`
    Terms { field: String, values: Vec<Value> },
    /// Comparison: `{range: {field: {op: value}}}`
    Range {
        field: String,
        operator: RangeOperator,
        value: Value,
    },
    /// Contains match: `{wildcard: {field: "*pattern*"}}`
    Wildcard { field: String, pattern: String },
    /// Field presence
    Exists { field: String },
    /// Field absence
    NotExists { field: String },
    /// Free-text match against weighted fields (`"title^3"`)
    MultiMatch { query: String, fields: Vec<String> },
    /// Caller-supplied fragment, passed through without validation.
    ///
    /// The caller is responsible for producing well-formed query DSL.
    Raw(Value),
}

impl Clause {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotTerm {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: impl Into<String>, operator: RangeOperator, value: impl Into<Value>) -> Self {
        Self::Range {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Substring match; the pattern is wrapped in `*` on both sides.
    pub fn wildcard(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists { field: field.into() }
    }

    pub fn not_exists(field: impl Into<String>) -> Self {
        Self::NotExists { field: field.into() }
    }

    pub fn multi_match(query: impl Into<String>, fields: Vec<String>) -> Self {
        Self::MultiMatch {
            query: query.into(),
            fields,
        }
    }
}

/// The three clause buckets of a `bool` query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    /// Must match, does not score
    pub filter: Vec<Clause>,
    /// Must match, scores
    pub must: Vec<Clause>,
    /// Optional, scores
    pub should: Vec<Clause>,
}

impl BoolQuery {
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.must.is_empty() && self.should.is_empty()
    }

    pub fn clear(&mut self) {
        self.filter.clear();
        self.must.clear();
        self.should.clear();
    }
}

/// Range comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOperator {
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
}

impl RangeOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeOperator {
    type Err = String;

    /// Accepts the DSL names (`gte`) and the comparison symbols (`>=`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gt" | ">" => Ok(Self::Gt),
            "gte" | ">=" => Ok(Self::Gte),
            "lt" | "<" => Ok(Self::Lt),
            "lte" | "<=" => Ok(Self::Lte),
            other => Err(format!("unknown range operator '{}'", other)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// One entry of the `sort` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SortDirective {
    /// `{field: {order}}`
    Field { field: String, order: SortOrder },
    /// Scripted sort ranking documents whose `field` equals `value` first.
    ValueFirst { field: String, value: Value },
}

/// A one-level terms aggregation: `{terms: {field, size}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsAggregation {
    pub field: String,
    pub size: u64,
}

impl TermsAggregation {
    pub const DEFAULT_SIZE: u64 = 50;

    pub fn new(field: impl Into<String>, size: u64) -> Self {
        Self {
            field: field.into(),
            size,
        }
    }
}

/// One keyword or an ordered list of keywords.
///
/// Joined with a single space into a free-text query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keywords(pub Vec<String>);

impl Keywords {
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl From<&str> for Keywords {
    fn from(keyword: &str) -> Self {
        Self(vec![keyword.to_string()])
    }
}

impl From<String> for Keywords {
    fn from(keyword: String) -> Self {
        Self(vec![keyword])
    }
}

impl From<Vec<String>> for Keywords {
    fn from(keywords: Vec<String>) -> Self {
        Self(keywords)
    }
}

impl From<Vec<&str>> for Keywords {
    fn from(keywords: Vec<&str>) -> Self {
        Self(keywords.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Keywords {
    fn from(keywords: &[&str]) -> Self {
        Self(keywords.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Keywords {
    fn from(keywords: [&str; N]) -> Self {
        Self(keywords.iter().map(|k| k.to_string()).collect())
    }
}

/// One value or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldValues(pub Vec<Value>);

impl From<Value> for FieldValues {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self(values),
            other => Self(vec![other]),
        }
    }
}

impl From<&str> for FieldValues {
    fn from(value: &str) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<String> for FieldValues {
    fn from(value: String) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<i64> for FieldValues {
    fn from(value: i64) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl From<bool> for FieldValues {
    fn from(value: bool) -> Self {
        Self(vec![Value::from(value)])
    }
}

impl<T: Into<Value>> From<Vec<T>> for FieldValues {
    fn from(values: Vec<T>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for FieldValues {
    fn from(values: [T; N]) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}
