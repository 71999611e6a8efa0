use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the durable key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// Saving the current sheet failed; the in-memory sheet is untouched
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to serialize sheet: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Import payload was not valid JSON
#[derive(Debug, Error)]
#[error("Invalid JSON file: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize sheet: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write export file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Importing a file either failed to parse (nothing changed) or was applied
/// but could not be saved
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Imported but not saved: {0}")]
    Persist(#[from] PersistError),
}
