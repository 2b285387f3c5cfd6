//! Shared helpers for the service integration tests

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use tessera_config::model::EntryForm;
use tessera_persistence::Migrator;

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection so every query sees the same in-memory
/// SQLite database.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn form(
    module: &str,
    config_name: &str,
    code: Option<&str>,
    user_id: Option<&str>,
    enabled: Option<bool>,
) -> EntryForm {
    EntryForm {
        module: module.to_string(),
        config_name: config_name.to_string(),
        code: code.map(str::to_string),
        user_id: user_id.map(str::to_string),
        value: "true".to_string(),
        enabled,
        ..Default::default()
    }
}
