//! Predicate evaluation over one record
//!
//! Records are semi-structured `serde_json::Value` maps; field paths are
//! dot-addressable (`metadata.createdDate`). Evaluation is pure and never
//! touches storage.

use std::cmp::Ordering;

use serde_json::Value;

use tessera_api::{Predicate, SortClause, SortOrder};

/// Resolve a dot-addressable path inside a record.
///
/// Returns `None` for a missing segment or an explicit JSON null.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// Evaluate a predicate against one record
pub fn matches(predicate: &Predicate, record: &Value) -> bool {
    match predicate {
        Predicate::All => true,
        Predicate::Eq { field, value } => {
            lookup(record, field).is_some_and(|found| scalar_eq(found, value))
        }
        Predicate::Lt { field, value } => {
            lookup(record, field)
                .and_then(|found| compare_scalars(found, value))
                .is_some_and(|ordering| ordering == Ordering::Less)
        }
        Predicate::Gt { field, value } => {
            lookup(record, field)
                .and_then(|found| compare_scalars(found, value))
                .is_some_and(|ordering| ordering == Ordering::Greater)
        }
        Predicate::Prefix { field, value } => lookup(record, field)
            .and_then(Value::as_str)
            .is_some_and(|found| found.starts_with(value.as_str())),
        Predicate::And { clauses } => clauses.iter().all(|clause| matches(clause, record)),
        Predicate::Or { clauses } => clauses.iter().any(|clause| matches(clause, record)),
        Predicate::Not { clause } => !matches(clause, record),
    }
}

/// Sort records in place by the requested clause.
///
/// The sort is stable, so ties keep their insertion order. Records missing
/// the sort field order before everything else.
pub fn sort_records(records: &mut [Value], clause: &SortClause) {
    records.sort_by(|a, b| {
        let ordering = compare_for_sort(lookup(a, &clause.field), lookup(b, &clause.field));
        match clause.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Render a scalar field value for facet bucketing
pub(crate) fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_eq(a: &Value, b: &Value) -> bool {
    // 2 and 2.0 are the same number even though serde_json says otherwise
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_scalars(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_for_sort(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_scalars(a, b)
            .unwrap_or_else(|| render(a).unwrap_or_default().cmp(&render(b).unwrap_or_default())),
    }
}
