//! Configuration entry entity
//!
//! One row per stored configuration entry. The scope key is
//! (module, config_name, code, user_id) within a tenant; `code` and
//! `user_id` are nullable so absence is a distinct bucket, never the
//! empty string.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "config_entry")]
pub struct Model {
    /// UUID assigned on creation, immutable thereafter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tenant_id: String,
    pub module: String,
    pub config_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Owner of the entry; NULL means tenant-wide scope
    #[sea_orm(column_type = "Text", nullable)]
    pub user_id: Option<String>,
    /// Opaque payload; modules store JSON, base64 or plain text here
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub enabled: bool,
    /// Module-shipped baseline flag, informational only
    pub is_default: bool,
    pub created_date: DateTime,
    #[sea_orm(column_type = "Text", nullable)]
    pub created_by: Option<String>,
    pub updated_date: DateTime,
    #[sea_orm(column_type = "Text", nullable)]
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
