//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::persist::PersistedState;
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps saved states in a map. Used by tests and hosts without a disk.
#[derive(Default)]
pub struct MemoryStorage {
    states: RwLock<HashMap<String, PersistedState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, state: &PersistedState) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let state = state.clone();
        Box::pin(async move {
            self.states.write().map_err(lock_error)?.insert(key, state);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<PersistedState>> {
        let key = key.to_string();
        Box::pin(async move {
            let states = self.states.read().map_err(lock_error)?;
            states.get(&key).cloned().ok_or(StorageError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            self.states.write().map_err(lock_error)?.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let states = self.states.read().map_err(lock_error)?;
            let mut keys: Vec<String> = states.keys().cloned().collect();
            keys.sort();
            Ok(keys)
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.states.read().map_err(lock_error)?.contains_key(&key)) })
    }
}
