//! Configuration entry service layer
//!
//! This module provides the entry mutation path and list queries:
//! - create/replace/delete with the one-enabled-entry-per-scope-key check
//! - per-scope-key write serialization
//! - audit records written in the same transaction as the entry change

use chrono::Utc;
use sea_orm::*;

use tessera_api::{SearchRequest, SearchResult};
use tessera_common::TesseraError;
use tessera_persistence::entity::config_entry;

use crate::{
    model::{AuditOperation, ConfigEntry, EntryForm, EntryMetadata, ScopeKey},
    query,
    service::{ScopeLocks, audit},
};

/// Decide whether a candidate may join its scope-key bucket.
///
/// A disabled candidate is always accepted. An enabled candidate is
/// rejected when any peer in the bucket is already enabled; the error
/// carries the conflicting entry id.
pub fn validate_uniqueness(enabled: bool, peers: &[ConfigEntry]) -> Result<(), String> {
    if !enabled {
        return Ok(());
    }
    match peers.iter().find(|peer| peer.enabled) {
        Some(conflict) => Err(conflict.id.clone()),
        None => Ok(()),
    }
}

/// Create a new entry: assign id and metadata, enforce the scope-key
/// invariant, persist, and audit.
pub async fn create(
    db: &DatabaseConnection,
    locks: &ScopeLocks,
    tenant_id: &str,
    actor: Option<&str>,
    form: EntryForm,
) -> anyhow::Result<ConfigEntry> {
    validate_form(&form)?;

    let now = Utc::now().naive_utc();
    let entry = ConfigEntry {
        id: uuid::Uuid::new_v4().to_string(),
        module: form.module,
        config_name: form.config_name,
        code: form.code,
        description: form.description,
        user_id: form.user_id,
        value: form.value,
        enabled: form.enabled.unwrap_or(true),
        r#default: form.r#default.unwrap_or(false),
        metadata: EntryMetadata {
            created_date: Some(now),
            created_by: actor.map(str::to_string),
            updated_date: Some(now),
            updated_by: actor.map(str::to_string),
        },
    };

    let key = entry.scope_key();
    let _guard = locks.acquire(tenant_id, &key).await;

    let peers = find_scope_peers(db, tenant_id, &key, None).await?;
    if let Err(conflicting_id) = validate_uniqueness(entry.enabled, &peers) {
        return Err(unique_violation(&entry, conflicting_id).into());
    }

    let tx = db.begin().await?;
    config_entry::Entity::insert(active_model(tenant_id, &entry, now))
        .exec(&tx)
        .await?;
    audit::record(&tx, tenant_id, &entry, AuditOperation::Create).await?;
    tx.commit().await?;

    Ok(entry)
}

/// Replace an entry wholesale.
///
/// The scope key may change; the invariant is checked against the new key
/// with the replaced entry excluded, so an entry never conflicts with
/// itself. An omitted `enabled` flag restores the entry to enabled.
pub async fn replace(
    db: &DatabaseConnection,
    locks: &ScopeLocks,
    tenant_id: &str,
    actor: Option<&str>,
    id: &str,
    form: EntryForm,
) -> anyhow::Result<ConfigEntry> {
    validate_form(&form)?;

    let existing = find_one(db, tenant_id, id)
        .await?
        .ok_or_else(|| TesseraError::not_found("entry", id))?;

    let now = Utc::now().naive_utc();
    let entry = ConfigEntry {
        id: existing.id.clone(),
        module: form.module,
        config_name: form.config_name,
        code: form.code,
        description: form.description,
        user_id: form.user_id,
        value: form.value,
        enabled: form.enabled.unwrap_or(true),
        r#default: form.r#default.unwrap_or(false),
        metadata: EntryMetadata {
            created_date: existing.metadata.created_date,
            created_by: existing.metadata.created_by.clone(),
            updated_date: Some(now),
            updated_by: actor.map(str::to_string),
        },
    };

    let key = entry.scope_key();
    let _guard = locks.acquire(tenant_id, &key).await;

    let peers = find_scope_peers(db, tenant_id, &key, Some(id)).await?;
    if let Err(conflicting_id) = validate_uniqueness(entry.enabled, &peers) {
        return Err(unique_violation(&entry, conflicting_id).into());
    }

    let tx = db.begin().await?;
    let result = config_entry::Entity::update_many()
        .set(active_model(tenant_id, &entry, now))
        .filter(config_entry::Column::Id.eq(id))
        .filter(config_entry::Column::TenantId.eq(tenant_id))
        .exec(&tx)
        .await?;
    if result.rows_affected != 1 {
        tracing::error!(
            id,
            rows_affected = result.rows_affected,
            "replace touched an unexpected row count"
        );
        return Err(TesseraError::Internal(format!(
            "replace of entry '{}' affected {} rows",
            id, result.rows_affected
        ))
        .into());
    }
    audit::record(&tx, tenant_id, &entry, AuditOperation::Update).await?;
    tx.commit().await?;

    Ok(entry)
}

/// Hard-delete an entry; only the audit trail keeps its history.
pub async fn delete(db: &DatabaseConnection, tenant_id: &str, id: &str) -> anyhow::Result<()> {
    let existing = find_one(db, tenant_id, id)
        .await?
        .ok_or_else(|| TesseraError::not_found("entry", id))?;

    let tx = db.begin().await?;
    let result = config_entry::Entity::delete_many()
        .filter(config_entry::Column::Id.eq(id))
        .filter(config_entry::Column::TenantId.eq(tenant_id))
        .exec(&tx)
        .await?;
    if result.rows_affected != 1 {
        tracing::error!(
            id,
            rows_affected = result.rows_affected,
            "delete touched an unexpected row count"
        );
        return Err(TesseraError::Internal(format!(
            "delete of entry '{}' affected {} rows",
            id, result.rows_affected
        ))
        .into());
    }
    // Pre-delete snapshot keeps the trail whole after the hard delete
    audit::record(&tx, tenant_id, &existing, AuditOperation::Delete).await?;
    tx.commit().await?;

    Ok(())
}

/// Find a single entry by id
pub async fn find_one(
    db: &DatabaseConnection,
    tenant_id: &str,
    id: &str,
) -> anyhow::Result<Option<ConfigEntry>> {
    let entity = config_entry::Entity::find()
        .filter(config_entry::Column::Id.eq(id))
        .filter(config_entry::Column::TenantId.eq(tenant_id))
        .one(db)
        .await?;

    Ok(entity.map(ConfigEntry::from))
}

/// List entries with filter, sort, pagination and facets
pub async fn search(
    db: &DatabaseConnection,
    tenant_id: &str,
    request: &SearchRequest,
) -> anyhow::Result<SearchResult> {
    let rows = config_entry::Entity::find()
        .filter(config_entry::Column::TenantId.eq(tenant_id))
        .order_by_asc(config_entry::Column::CreatedDate)
        .order_by_asc(config_entry::Column::Id)
        .all(db)
        .await?;

    let records = rows
        .into_iter()
        .map(|row| serde_json::to_value(ConfigEntry::from(row)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(query::execute(records, request)?)
}

// Helper functions

fn validate_form(form: &EntryForm) -> Result<(), TesseraError> {
    if form.module.trim().is_empty() {
        return Err(TesseraError::invalid_param("module", "must not be empty"));
    }
    if form.config_name.trim().is_empty() {
        return Err(TesseraError::invalid_param(
            "configName",
            "must not be empty",
        ));
    }
    Ok(())
}

async fn find_scope_peers(
    db: &DatabaseConnection,
    tenant_id: &str,
    key: &ScopeKey,
    exclude_id: Option<&str>,
) -> anyhow::Result<Vec<ConfigEntry>> {
    let mut select = config_entry::Entity::find()
        .filter(config_entry::Column::TenantId.eq(tenant_id))
        .filter(config_entry::Column::Module.eq(&key.module))
        .filter(config_entry::Column::ConfigName.eq(&key.config_name));

    // NULL is its own bucket; an empty string is a value like any other
    select = match &key.code {
        Some(code) => select.filter(config_entry::Column::Code.eq(code)),
        None => select.filter(config_entry::Column::Code.is_null()),
    };
    select = match &key.user_id {
        Some(user_id) => select.filter(config_entry::Column::UserId.eq(user_id)),
        None => select.filter(config_entry::Column::UserId.is_null()),
    };
    if let Some(id) = exclude_id {
        select = select.filter(config_entry::Column::Id.ne(id));
    }

    Ok(select
        .all(db)
        .await?
        .into_iter()
        .map(ConfigEntry::from)
        .collect())
}

fn unique_violation(entry: &ConfigEntry, conflicting_id: String) -> TesseraError {
    TesseraError::UniqueViolation {
        module: entry.module.clone(),
        config_name: entry.config_name.clone(),
        conflicting_id,
    }
}

fn active_model(
    tenant_id: &str,
    entry: &ConfigEntry,
    now: chrono::NaiveDateTime,
) -> config_entry::ActiveModel {
    config_entry::ActiveModel {
        id: Set(entry.id.clone()),
        tenant_id: Set(tenant_id.to_string()),
        module: Set(entry.module.clone()),
        config_name: Set(entry.config_name.clone()),
        code: Set(entry.code.clone()),
        description: Set(entry.description.clone()),
        user_id: Set(entry.user_id.clone()),
        value: Set(entry.value.clone()),
        enabled: Set(entry.enabled),
        is_default: Set(entry.r#default),
        created_date: Set(entry.metadata.created_date.unwrap_or(now)),
        created_by: Set(entry.metadata.created_by.clone()),
        updated_date: Set(entry.metadata.updated_date.unwrap_or(now)),
        updated_by: Set(entry.metadata.updated_by.clone()),
    }
}
