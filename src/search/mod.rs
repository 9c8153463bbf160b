// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Document Model
//!
//! Typed clauses, their query-DSL translation, and the request/response
//! documents exchanged with the cluster.
//!
//! # Architecture
//!
//! ```text
//! Clause / SortDirective / TermsAggregation (AST)
//!     ↓
//!     DslTranslator → query DSL JSON
//!     ↓
//!     RequestDocument → SearchClient
//!     ↓
//!     raw JSON → SearchResponse (optional typed view)
//! ```
//!
//! # Clause Kinds
//!
//! ```text
//! term        - exact match (filter)
//! not term    - negated exact match (filter)
//! terms       - set membership (filter)
//! range       - gt / gte / lt / lte (filter)
//! wildcard    - contains, *pattern* (filter)
//! exists      - presence / absence (filter)
//! multi_match - free text over weighted fields (must / should)
//! raw         - unvalidated passthrough (filter)
//! ```

mod clause;
mod dsl_translator;
mod request;
mod response;

pub use clause::{
    BoolQuery, Clause, FieldValues, Keywords, RangeOperator, SortDirective, SortOrder,
    TermsAggregation,
};
pub use dsl_translator::DslTranslator;
pub use request::RequestDocument;
pub use response::{Bucket, Hit, Hits, SearchResponse, TotalHits};
