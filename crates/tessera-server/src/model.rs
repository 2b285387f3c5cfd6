//! Shared application state

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use tessera_config::ScopeLocks;

/// Central application state handed to every handler.
///
/// The storage handle and the scope-lock registry are owned here and
/// passed explicitly into core operations; the core keeps no globals.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub scope_locks: Arc<ScopeLocks>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            scope_locks: Arc::new(ScopeLocks::new()),
        }
    }
}
