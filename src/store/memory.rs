use std::collections::HashMap;

use super::{Store, check_quota};
use crate::error::StoreError;

/// In-process store, lost on exit
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single value larger than `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed a raw value, bypassing the quota
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        check_quota(self.quota, value.len())?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_and_keeps_old_value() {
        let mut store = MemoryStore::with_quota(4);
        store.set("k", "abcd").unwrap();
        let err = store.set("k", "abcde").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                needed: 5,
                limit: 4
            }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abcd"));
    }
}
