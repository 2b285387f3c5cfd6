//! Tessera API - Query and response data model
//!
//! This crate defines the transport-facing contract of the store:
//! - The parsed predicate tree consumed by the query engine
//! - Sort and facet request parsing
//! - The `SearchResult` envelope returned by list operations

pub mod model;
pub mod query;

// Re-export commonly used types
pub use model::{FacetCount, SearchResult};
pub use query::{FacetRequest, Predicate, SearchRequest, SortClause, SortOrder};
