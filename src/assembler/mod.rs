// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query assembler
//!
//! Accumulates clauses, sort directives and aggregations through chained
//! calls, then assembles them into one [`RequestDocument`].
//!
//! # Lifecycle
//!
//! ```text
//! accumulate (where_*, order_by, aggregate_terms, paginate, ...)
//!     ↓
//! build_request() / execute()      ← repeatable, does not consume state
//!     ↓
//! reset()                          ← optional, then accumulate again
//! ```
//!
//! An assembler belongs to one query-building sequence. Build concurrent
//! queries with separate assemblers sharing one client handle.

mod api;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::client::SearchClient;
use crate::config::QuelasticConfig;
use crate::reporting::{ErrorReporter, NoopReporter};
use crate::search::{
    BoolQuery, Clause, DslTranslator, FieldValues, Keywords, RangeOperator, RequestDocument,
    SortDirective, SortOrder, TermsAggregation,
};

/// Fluent builder for search requests.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use quelastic::{HttpSearchClient, QueryAssembler, QuelasticConfig, RangeOperator};
///
/// # async fn example() -> Result<(), quelastic::QueryError> {
/// let config = QuelasticConfig::from_env();
/// let client = Arc::new(HttpSearchClient::new(&config)?);
///
/// let response = QueryAssembler::with_config(client, &config)
///     .index("products")
///     .where_equals("status", "published")
///     .where_range("price", RangeOperator::Lte, 100)
///     .where_keywords(["desk", "lamp"], ["title^3", "description"], false)
///     .order_by_desc("created_at")
///     .aggregate_terms_default("by_brand", "brand")
///     .paginate(0, Some(10))
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct QueryAssembler {
    client: Arc<dyn SearchClient>,
    reporter: Arc<dyn ErrorReporter>,
    debug: bool,

    query: BoolQuery,
    sort: Vec<SortDirective>,
    aggregations: BTreeMap<String, TermsAggregation>,
    base_parameters: Map<String, Value>,
    body_size: Option<u64>,
    include_source: bool,
    from: u64,
    size: u64,
}

impl QueryAssembler {
    pub const DEFAULT_PAGE_SIZE: u64 = 20;

    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            reporter: Arc::new(NoopReporter),
            debug: false,
            query: BoolQuery::default(),
            sort: Vec::new(),
            aggregations: BTreeMap::new(),
            base_parameters: Map::new(),
            body_size: None,
            include_source: true,
            from: 0,
            size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create an assembler honoring the config's debug switch and page size.
    pub fn with_config(client: Arc<dyn SearchClient>, config: &QuelasticConfig) -> Self {
        let mut assembler = Self::new(client);
        assembler.debug = config.debug;
        assembler.size = config.default_page_size;
        assembler
    }

    /// Forward failed calls to `reporter`.
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // State
    // ═══════════════════════════════════════════════════════════════════════

    /// Clear clauses, sort, aggregations and the request body.
    ///
    /// Pagination and source settings survive.
    pub fn reset(mut self) -> Self {
        self.query.clear();
        self.sort.clear();
        self.aggregations.clear();
        self.body_size = None;
        self.base_parameters.remove("body");
        self
    }

    /// Replace the base parameters wholesale.
    ///
    /// Must contain `index` before the request is executed.
    pub fn set_base_parameters(mut self, params: Map<String, Value>) -> Self {
        self.base_parameters = params;
        self
    }

    /// Set the target index in the base parameters.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.base_parameters
            .insert("index".to_string(), Value::String(index.into()));
        self
    }

    pub fn base_parameters(&self) -> &Map<String, Value> {
        &self.base_parameters
    }

    pub fn bool_query(&self) -> &BoolQuery {
        &self.query
    }

    pub fn sort_directives(&self) -> &[SortDirective] {
        &self.sort
    }

    pub fn aggregations(&self) -> &BTreeMap<String, TermsAggregation> {
        &self.aggregations
    }

    pub fn from_offset(&self) -> u64 {
        self.from
    }

    pub fn page_size(&self) -> u64 {
        self.size
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Clauses
    // ═══════════════════════════════════════════════════════════════════════

    pub fn where_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.filter.push(Clause::term(field, value));
        self
    }

    pub fn where_not_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.filter.push(Clause::not_term(field, value));
        self
    }

    pub fn where_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.query.filter.push(Clause::terms(field, values));
        self
    }

    /// Free-text match of the space-joined keywords against `boosted_fields`
    /// (e.g. `"title^3"`). Scores under `must` when `required`, else `should`.
    pub fn where_keywords<I, F>(mut self, keywords: impl Into<Keywords>, boosted_fields: I, required: bool) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let clause = Clause::multi_match(
            keywords.into().joined(),
            boosted_fields.into_iter().map(Into::into).collect(),
        );
        if required {
            self.query.must.push(clause);
        } else {
            self.query.should.push(clause);
        }
        self
    }

    pub fn where_range(mut self, field: impl Into<String>, operator: RangeOperator, value: impl Into<Value>) -> Self {
        self.query.filter.push(Clause::range(field, operator, value));
        self
    }

    /// Append a filter fragment verbatim. Not validated.
    pub fn raw_filter(mut self, fragment: Value) -> Self {
        self.query.filter.push(Clause::Raw(fragment));
        self
    }

    /// Match values containing `pattern`.
    pub fn wildcard(mut self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.query.filter.push(Clause::wildcard(field, pattern));
        self
    }

    pub fn exists(mut self, field: impl Into<String>) -> Self {
        self.query.filter.push(Clause::exists(field));
        self
    }

    pub fn not_exists(mut self, field: impl Into<String>) -> Self {
        self.query.filter.push(Clause::not_exists(field));
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Sort, aggregations, paging
    // ═══════════════════════════════════════════════════════════════════════

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(SortDirective::Field {
            field: field.into(),
            order,
        });
        self
    }

    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, SortOrder::Desc)
    }

    /// Rank documents whose `field` equals each of `values` first, one
    /// cascading directive per value in argument order.
    pub fn sort_by_field_value(mut self, field: impl Into<String>, values: impl Into<FieldValues>) -> Self {
        let field = field.into();
        for value in values.into().0 {
            self.sort.push(SortDirective::ValueFirst {
                field: field.clone(),
                value,
            });
        }
        self
    }

    /// Define or overwrite the terms aggregation `name`.
    pub fn aggregate_terms(mut self, name: impl Into<String>, field: impl Into<String>, size: u64) -> Self {
        self.aggregations
            .insert(name.into(), TermsAggregation::new(field, size));
        self
    }

    pub fn aggregate_terms_default(self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.aggregate_terms(name, field, TermsAggregation::DEFAULT_SIZE)
    }

    /// Set `size` inside the request body.
    ///
    /// Independent of the top-level size set by [`paginate`](Self::paginate).
    pub fn set_page_size(mut self, size: u64) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Set the offset, and the page size when given.
    pub fn paginate(mut self, offset: u64, size: Option<u64>) -> Self {
        self.from = offset;
        if let Some(size) = size {
            self.size = size;
        }
        self
    }

    /// Ask the cluster not to return `_source` when `suppress` is true.
    pub fn without_source(mut self, suppress: bool) -> Self {
        self.include_source = !suppress;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Finalization
    // ═══════════════════════════════════════════════════════════════════════

    /// Assemble the request document without dispatching it.
    ///
    /// Repeated calls with no mutation in between return equal documents.
    pub fn build_request(&self) -> RequestDocument {
        let mut params = self.base_parameters.clone();

        let mut body = match params.remove("body") {
            Some(Value::Object(body)) => body,
            _ => Map::new(),
        };
        if let Some(size) = self.body_size {
            body.insert("size".to_string(), Value::from(size));
        }
        if !self.query.is_empty() {
            body.insert("query".to_string(), DslTranslator::translate_bool(&self.query));
        }
        if !self.sort.is_empty() {
            let sort = self.sort.iter().map(DslTranslator::translate_sort).collect();
            body.insert("sort".to_string(), Value::Array(sort));
        }
        if !self.aggregations.is_empty() {
            body.insert(
                "aggs".to_string(),
                DslTranslator::translate_aggregations(&self.aggregations),
            );
        }
        if !body.is_empty() {
            params.insert("body".to_string(), Value::Object(body));
        }

        if !self.include_source {
            params.insert("_source".to_string(), Value::Bool(false));
        }
        params.insert("from".to_string(), Value::from(self.from));
        params.insert("size".to_string(), Value::from(self.size));

        RequestDocument::new(params)
    }
}
