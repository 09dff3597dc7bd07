//! In-memory storage backend (used in tests and headless runs).

use crate::error::{SaveError, SaveResult};
use std::collections::HashMap;

use super::{check_quota, entry_size, KeyValueStorage};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries:     HashMap<String, String>,
    quota:       Option<usize>,
    unavailable: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total bytes (keys plus values) this storage will hold.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// A storage that refuses every operation, like a browser with
    /// storage disabled or denied.
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self { unavailable: Some(reason.into()), ..Self::default() }
    }

    /// Pre-seed a raw value, bypassing quota. For tests that need a
    /// specific stored text.
    pub fn seeded(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_available(&self) -> SaveResult<()> {
        match &self.unavailable {
            Some(reason) => Err(SaveError::StorageUnavailable { reason: reason.clone() }),
            None => Ok(()),
        }
    }

    fn bytes_in_use_except(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| entry_size(k, v))
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> SaveResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SaveResult<()> {
        self.ensure_available()?;
        check_quota(self.quota, self.bytes_in_use_except(key), entry_size(key, value))?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SaveResult<()> {
        self.ensure_available()?;
        self.entries.remove(key);
        Ok(())
    }
}
