//! Audit trail data models

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tessera_persistence::entity::audit_record;

/// Mutation kind recorded in the audit trail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOperation {
    Create,
    Update,
    Delete,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOperation::Create => "CREATE",
            AuditOperation::Update => "UPDATE",
            AuditOperation::Delete => "DELETE",
        }
    }
}

impl Display for AuditOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read model for one audit record
///
/// `snapshot` is the full entry state at mutation time: post-state for
/// create/update, pre-state for delete.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: i64,
    pub origin_id: String,
    pub operation: String,
    pub snapshot: Value,
    pub created_date: NaiveDateTime,
}

impl From<audit_record::Model> for AuditEntry {
    fn from(value: audit_record::Model) -> Self {
        Self {
            id: value.id,
            origin_id: value.origin_id,
            operation: value.operation,
            snapshot: serde_json::from_str(&value.snapshot).unwrap_or_default(),
            created_date: value.created_date,
        }
    }
}
