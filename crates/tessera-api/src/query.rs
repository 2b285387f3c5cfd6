//! Parsed query model for list requests
//!
//! A client query arrives as a pre-parsed predicate tree (JSON), an optional
//! sort clause and a facet request list. This module defines those types and
//! validates their shape; evaluation lives in the query engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tessera_common::{DEFAULT_FACET_COUNT, DEFAULT_PAGE_LIMIT, TesseraError};

/// A structured query expression over the dot-addressable fields of a record
///
/// `metadata.createdDate` style paths reach into nested objects. An omitted
/// predicate is equivalent to `All`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Predicate {
    /// Matches every record
    All,
    /// Exact match on a scalar field
    Eq { field: String, value: Value },
    /// Field strictly less than a scalar value
    Lt { field: String, value: Value },
    /// Field strictly greater than a scalar value
    Gt { field: String, value: Value },
    /// Wildcard prefix match on a string field
    Prefix { field: String, value: String },
    And { clauses: Vec<Predicate> },
    Or { clauses: Vec<Predicate> },
    Not { clause: Box<Predicate> },
}

impl Predicate {
    /// Check the tree shape before evaluation.
    ///
    /// Malformed expressions surface the offending field so callers can
    /// report a client-correctable error instead of crashing mid-scan.
    pub fn validate(&self) -> Result<(), TesseraError> {
        match self {
            Predicate::All => Ok(()),
            Predicate::Eq { field, value }
            | Predicate::Lt { field, value }
            | Predicate::Gt { field, value } => {
                if field.trim().is_empty() {
                    return Err(TesseraError::invalid_param(
                        "query",
                        "comparison with an empty field name",
                    ));
                }
                if !is_scalar(value) {
                    return Err(TesseraError::invalid_param(
                        field.clone(),
                        "comparison value must be a string, number or boolean",
                    ));
                }
                Ok(())
            }
            Predicate::Prefix { field, .. } => {
                if field.trim().is_empty() {
                    return Err(TesseraError::invalid_param(
                        "query",
                        "prefix match with an empty field name",
                    ));
                }
                Ok(())
            }
            Predicate::And { clauses } | Predicate::Or { clauses } => {
                clauses.iter().try_for_each(Predicate::validate)
            }
            Predicate::Not { clause } => clause.validate(),
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    value.is_string() || value.is_number() || value.is_boolean()
}

/// Sort direction for a sort clause
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort clause: field path plus direction
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortClause {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortClause {
    /// Parse the `sort` query parameter: `field`, `field:asc` or `field:desc`
    pub fn parse(raw: &str) -> Result<SortClause, TesseraError> {
        let (field, order) = match raw.split_once(':') {
            None => (raw.trim(), SortOrder::Ascending),
            Some((field, "asc")) => (field.trim(), SortOrder::Ascending),
            Some((field, "desc")) => (field.trim(), SortOrder::Descending),
            Some((_, other)) => {
                return Err(TesseraError::invalid_param(
                    "sort",
                    format!("unknown sort direction '{}'", other),
                ));
            }
        };
        if field.is_empty() {
            return Err(TesseraError::invalid_param("sort", "empty sort field"));
        }
        Ok(SortClause {
            field: field.to_string(),
            order,
        })
    }
}

/// One requested facet: field path plus how many top values to return
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetRequest {
    pub field: String,
    pub top_n: usize,
}

impl FacetRequest {
    /// Parse the `facets` query parameter: comma-separated `field` or
    /// `field:count` items, e.g. `code:2,module`.
    ///
    /// Leading/trailing commas and empty segments are rejected, as are
    /// counts below 1. An omitted count defaults to 5.
    pub fn parse_list(raw: &str) -> Result<Vec<FacetRequest>, TesseraError> {
        if raw.trim().is_empty() {
            return Err(TesseraError::invalid_param("facets", "empty facet list"));
        }
        raw.split(',').map(Self::parse_one).collect()
    }

    fn parse_one(segment: &str) -> Result<FacetRequest, TesseraError> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(TesseraError::invalid_param(
                "facets",
                "empty facet segment (leading, trailing or doubled comma)",
            ));
        }
        let (field, top_n) = match segment.split_once(':') {
            None => (segment, DEFAULT_FACET_COUNT),
            Some((field, count)) => {
                let count: usize = count.trim().parse().map_err(|_| {
                    TesseraError::invalid_param(
                        field.trim(),
                        format!("facet count '{}' is not a number", count),
                    )
                })?;
                if count < 1 {
                    return Err(TesseraError::invalid_param(
                        field.trim(),
                        "facet count must be at least 1",
                    ));
                }
                (field.trim(), count)
            }
        };
        if field.is_empty() {
            return Err(TesseraError::invalid_param("facets", "empty facet field"));
        }
        Ok(FacetRequest {
            field: field.to_string(),
            top_n,
        })
    }
}

/// A full list request handed to the query coordinator
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    pub predicate: Option<Predicate>,
    pub sort: Option<SortClause>,
    pub offset: u64,
    pub limit: u64,
    pub facets: Vec<FacetRequest>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            predicate: None,
            sort: None,
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
            facets: vec![],
        }
    }
}
