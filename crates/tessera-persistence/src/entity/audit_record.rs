//! Audit record entity
//!
//! Append-only trail of entry mutations. Rows are written in the same
//! transaction as the entry change and are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tenant_id: String,
    /// Id of the configuration entry the mutation touched
    pub origin_id: String,
    /// Operation type: CREATE, UPDATE, DELETE
    pub operation: String,
    /// Full entry state as JSON: post-state for create/update, pre-state for delete
    #[sea_orm(column_type = "Text")]
    pub snapshot: String,
    pub created_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
