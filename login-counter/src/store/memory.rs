use std::collections::HashMap;
use std::sync::Mutex;

use login_counter_common::UserId;

use super::{MetaStore, StoreError};

/// In-process `MetaStore`, used as a test double and for embedding.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
    entries: Mutex<HashMap<(UserId, String), String>>,
}

impl MemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all users.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetaStore for MemoryMetaStore {
    fn get(&self, user_id: UserId, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(entries.get(&(user_id, key.to_string())).cloned())
    }

    fn set(&self, user_id: UserId, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        entries.insert((user_id, key.to_string()), value.to_string());
        Ok(())
    }
}
