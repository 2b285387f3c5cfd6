//! In-memory query engine
//!
//! Runs a list request over a raw record set: filter via the predicate
//! evaluator, sort, paginate, and compute facets. Storage access stays in
//! the service layer; everything here is pure computation.

pub mod facet;
pub mod predicate;

use serde_json::Value;

use tessera_api::{SearchRequest, SearchResult};
use tessera_common::TesseraError;

/// Execute a list request against a record set.
///
/// `total_records` is the filtered-set size before pagination, and facets
/// are computed over the same unpaginated set. An offset past the end
/// yields an empty page, not an error.
pub fn execute(records: Vec<Value>, request: &SearchRequest) -> Result<SearchResult, TesseraError> {
    if let Some(predicate) = &request.predicate {
        predicate.validate()?;
    }

    let mut filtered: Vec<Value> = match &request.predicate {
        Some(predicate) => records
            .into_iter()
            .filter(|record| predicate::matches(predicate, record))
            .collect(),
        // No predicate matches everything
        None => records,
    };

    if let Some(clause) = &request.sort {
        if clause.field.trim().is_empty() {
            return Err(TesseraError::invalid_param("sort", "empty sort field"));
        }
        predicate::sort_records(&mut filtered, clause);
    }

    let total_records = filtered.len() as u64;
    let facets = facet::count(&filtered, &request.facets);
    let records = filtered
        .into_iter()
        .skip(request.offset as usize)
        .take(request.limit as usize)
        .collect();

    Ok(SearchResult {
        records,
        total_records,
        facets,
    })
}
