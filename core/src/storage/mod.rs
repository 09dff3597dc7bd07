//! Durable key-value storage.
//!
//! RULE: only the storage backends touch persisted bytes.
//! The snapshot store goes through `KeyValueStorage` and never knows
//! which backend it has.

use crate::error::{SaveError, SaveResult};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Browser-style origin-scoped string storage: get, set, remove.
pub trait KeyValueStorage {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> SaveResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> SaveResult<()>;

    /// Delete a key. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> SaveResult<()>;
}

/// Bytes a single entry occupies against an origin's quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Fail with `QuotaExceeded` if writing `needed` more bytes on top of
/// `in_use` would go over `quota`.
pub(crate) fn check_quota(quota: Option<usize>, in_use: usize, needed: usize) -> SaveResult<()> {
    match quota {
        Some(quota) if in_use.saturating_add(needed) > quota => {
            Err(SaveError::QuotaExceeded { needed, quota: quota.saturating_sub(in_use) })
        }
        _ => Ok(()),
    }
}
