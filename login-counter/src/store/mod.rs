//! Per-user metadata storage.
//!
//! This module defines the `MetaStore` trait: a key/value store scoped to one
//! user account. Every operation is an independent single-key upsert; there is
//! no multi-key transaction.

mod memory;
mod sqlite;

pub use memory::MemoryMetaStore;
pub use sqlite::{SqliteStore, UserRecord};

use login_counter_common::UserId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

/// Host per-user key/value storage.
#[cfg_attr(test, mockall::automock)]
pub trait MetaStore: Send + Sync {
    /// Read the raw value stored under `key` for a user, if any.
    fn get(&self, user_id: UserId, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace the value stored under `key` for a user.
    fn set(&self, user_id: UserId, key: &str, value: &str) -> Result<(), StoreError>;
}
