//! In-memory key-value storage.
//!
//! # Responsibility
//! - Provide a non-durable adapter for tests and early UI integration.
//!
//! # Invariants
//! - Clones share the same underlying map, so a test can keep a handle and
//!   observe writes performed by the store's background writer.

use super::{PersistenceAdapter, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared-map adapter with the same contract as the SQLite backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, bypassing the adapter contract. Test setup helper.
    pub fn seed(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    // A poisoned map is still the most recent state; recover instead of
    // panicking inside the writer thread.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::PersistenceAdapter;

    #[test]
    fn get_returns_none_for_unset_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("@task").unwrap(), None);
    }

    #[test]
    fn set_overwrites_and_clones_share_state() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.set("@task", "[]").unwrap();
        storage.set("@task", "[{\"id\":\"X\",\"task\":\"X\"}]").unwrap();

        assert_eq!(
            observer.get("@task").unwrap().as_deref(),
            Some("[{\"id\":\"X\",\"task\":\"X\"}]")
        );
    }
}
