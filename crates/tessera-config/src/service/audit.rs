//! Audit trail service layer
//!
//! Every accepted mutation appends exactly one record here. Records are
//! written on the mutation's transaction and never touched again; read
//! access reuses the entry query engine.

use sea_orm::*;

use tessera_api::{SearchRequest, SearchResult};
use tessera_persistence::entity::audit_record;

use crate::{
    model::{AuditEntry, AuditOperation, ConfigEntry},
    query,
};

/// Append one audit record for an accepted mutation.
///
/// Runs on the caller's connection, normally the mutation transaction, so
/// the entry write and its audit record commit or roll back together. A
/// failure here propagates; it is never swallowed.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    tenant_id: &str,
    entry: &ConfigEntry,
    operation: AuditOperation,
) -> anyhow::Result<()> {
    let active = audit_record::ActiveModel {
        tenant_id: Set(tenant_id.to_string()),
        origin_id: Set(entry.id.clone()),
        operation: Set(operation.as_str().to_string()),
        snapshot: Set(serde_json::to_string(entry)?),
        created_date: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    audit_record::Entity::insert(active).exec(conn).await?;

    Ok(())
}

/// Browse the audit trail with the same filter/sort/paginate/facet
/// contract as entries, read-only.
pub async fn search(
    db: &DatabaseConnection,
    tenant_id: &str,
    request: &SearchRequest,
) -> anyhow::Result<SearchResult> {
    let rows = audit_record::Entity::find()
        .filter(audit_record::Column::TenantId.eq(tenant_id))
        .order_by_asc(audit_record::Column::Id)
        .all(db)
        .await?;

    let records = rows
        .into_iter()
        .map(|row| serde_json::to_value(AuditEntry::from(row)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(query::execute(records, request)?)
}
