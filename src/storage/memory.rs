use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{Result, StorageError};

/// In-process key-value store.
///
/// An optional quota caps the total bytes of keys and values, failing writes
/// the way a full browser store does.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Number of successful `set_item` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            let required = self.used_without(key) + key.len() + value.len();
            if required > limit {
                return Err(StorageError::QuotaExceeded { limit, required }.into());
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
