//! Create the config_entry and audit_record tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfigEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConfigEntry::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConfigEntry::TenantId).string().not_null())
                    .col(ColumnDef::new(ConfigEntry::Module).string().not_null())
                    .col(ColumnDef::new(ConfigEntry::ConfigName).string().not_null())
                    .col(ColumnDef::new(ConfigEntry::Code).text().null())
                    .col(ColumnDef::new(ConfigEntry::Description).text().null())
                    .col(ColumnDef::new(ConfigEntry::UserId).text().null())
                    .col(ColumnDef::new(ConfigEntry::Value).text().not_null())
                    .col(ColumnDef::new(ConfigEntry::Enabled).boolean().not_null())
                    .col(ColumnDef::new(ConfigEntry::IsDefault).boolean().not_null())
                    .col(
                        ColumnDef::new(ConfigEntry::CreatedDate)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConfigEntry::CreatedBy).text().null())
                    .col(
                        ColumnDef::new(ConfigEntry::UpdatedDate)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConfigEntry::UpdatedBy).text().null())
                    .to_owned(),
            )
            .await?;

        // Covers scope-key lookups on the mutation path
        manager
            .create_index(
                Index::create()
                    .name("idx_config_entry_scope")
                    .table(ConfigEntry::Table)
                    .col(ConfigEntry::TenantId)
                    .col(ConfigEntry::Module)
                    .col(ConfigEntry::ConfigName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuditRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditRecord::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditRecord::TenantId).string().not_null())
                    .col(ColumnDef::new(AuditRecord::OriginId).string().not_null())
                    .col(ColumnDef::new(AuditRecord::Operation).string().not_null())
                    .col(ColumnDef::new(AuditRecord::Snapshot).text().not_null())
                    .col(
                        ColumnDef::new(AuditRecord::CreatedDate)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_record_origin")
                    .table(AuditRecord::Table)
                    .col(AuditRecord::TenantId)
                    .col(AuditRecord::OriginId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditRecord::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ConfigEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConfigEntry {
    Table,
    Id,
    TenantId,
    Module,
    ConfigName,
    Code,
    Description,
    UserId,
    Value,
    Enabled,
    IsDefault,
    CreatedDate,
    CreatedBy,
    UpdatedDate,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum AuditRecord {
    Table,
    Id,
    TenantId,
    OriginId,
    Operation,
    Snapshot,
    CreatedDate,
}
