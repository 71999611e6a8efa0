//! Durable key-value storage for the serialized sheet

mod file;
mod memory;

pub use file::{FileStore, default_data_dir};
pub use memory::MemoryStore;

use crate::error::StoreError;

/// A string-valued key-value store that survives restarts
pub trait Store {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value. A failed write must leave any previous value intact.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn check_quota(quota: Option<usize>, needed: usize) -> Result<(), StoreError> {
    match quota {
        Some(limit) if needed > limit => Err(StoreError::QuotaExceeded { needed, limit }),
        _ => Ok(()),
    }
}
