//! Service layer: mutation coordination and audit trail access

pub mod audit;
pub mod entry;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::ScopeKey;

/// Per-scope-key write locks
///
/// The duplicate check and the following insert/update are not atomic at
/// the storage layer, so writers touching the same scope key must be
/// mutually exclusive. The registry is owned by the transport layer and
/// passed into every mutation; operations on different keys proceed in
/// parallel.
#[derive(Debug, Default)]
pub struct ScopeLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn acquire(&self, tenant_id: &str, key: &ScopeKey) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.lock_token(tenant_id))
            .or_default()
            .clone();
        lock.lock_owned().await
    }
}
