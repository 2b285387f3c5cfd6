//! Response envelopes for list operations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One distinct value of a faceted field together with its occurrence count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

/// Result of a list request: one page of records, the size of the full
/// filtered set, and the requested facet tables.
///
/// `total_records` counts the filtered set before pagination; facets are
/// likewise computed over the whole filtered set, never the page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub records: Vec<Value>,
    pub total_records: u64,
    pub facets: BTreeMap<String, Vec<FacetCount>>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
