//! Facet counting over a filtered record set

use std::collections::BTreeMap;

use serde_json::Value;

use tessera_api::{FacetCount, FacetRequest};

use super::predicate::{lookup, render};

/// Compute the requested facet tables.
///
/// Each field is counted independently over the whole filtered set. The
/// table is truncated to `top_n` values by count descending; ties break by
/// value ascending, so repeated computation over the same set is
/// deterministic. Records without the field contribute nothing.
pub fn count(records: &[Value], requests: &[FacetRequest]) -> BTreeMap<String, Vec<FacetCount>> {
    requests
        .iter()
        .map(|request| {
            let mut counts: BTreeMap<String, u64> = BTreeMap::new();
            for record in records {
                if let Some(value) = lookup(record, &request.field).and_then(render) {
                    *counts.entry(value).or_insert(0) += 1;
                }
            }

            // BTreeMap iterates value-ascending; the stable sort by count
            // keeps that order as the tie-break
            let mut table: Vec<FacetCount> = counts
                .into_iter()
                .map(|(value, count)| FacetCount { value, count })
                .collect();
            table.sort_by(|a, b| b.count.cmp(&a.count));
            table.truncate(request.top_n);

            (request.field.clone(), table)
        })
        .collect()
}
