//! Configuration entry data models and scope-key derivation

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tessera_persistence::entity::config_entry;

/// Server-controlled creation/update timestamps and actor attribution
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// One stored configuration entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigEntry {
    pub id: String,
    pub module: String,
    pub config_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Opaque payload; modules store JSON, base64 or plain text here
    pub value: String,
    pub enabled: bool,
    pub r#default: bool,
    pub metadata: EntryMetadata,
}

/// Form structure for entry create/replace requests
///
/// `enabled` is tri-state: an omitted flag means enabled, so a replace
/// that leaves it out restores the entry to enabled.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryForm {
    pub module: String,
    pub config_name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub value: String,
    pub enabled: Option<bool>,
    pub r#default: Option<bool>,
}

/// The uniqueness bucket an entry belongs to
///
/// `code` and `user_id` absence is a distinct, stable bucket equal only to
/// itself; an empty string is a value like any other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    pub module: String,
    pub config_name: String,
    pub code: Option<String>,
    pub user_id: Option<String>,
}

impl ScopeKey {
    /// Stable string form used to key the per-scope write locks
    pub fn lock_token(&self, tenant_id: &str) -> String {
        fn part(value: &Option<String>) -> String {
            match value {
                Some(value) => format!("={}", value),
                None => "~".to_string(),
            }
        }
        format!(
            "{}@@{}@@{}@@{}@@{}",
            tenant_id,
            self.module,
            self.config_name,
            part(&self.code),
            part(&self.user_id)
        )
    }
}

impl ConfigEntry {
    /// Derive the uniqueness bucket of this entry
    pub fn scope_key(&self) -> ScopeKey {
        ScopeKey {
            module: self.module.clone(),
            config_name: self.config_name.clone(),
            code: self.code.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl From<config_entry::Model> for ConfigEntry {
    fn from(value: config_entry::Model) -> Self {
        Self {
            id: value.id,
            module: value.module,
            config_name: value.config_name,
            code: value.code,
            description: value.description,
            user_id: value.user_id,
            value: value.value,
            enabled: value.enabled,
            r#default: value.is_default,
            metadata: EntryMetadata {
                created_date: Some(value.created_date),
                created_by: value.created_by,
                updated_date: Some(value.updated_date),
                updated_by: value.updated_by,
            },
        }
    }
}
