use std::fs;
use std::io;
use std::path::PathBuf;

use super::{Store, check_quota};
use crate::error::StoreError;

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
        }
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Platform data directory for the application, falling back to `./.letter-sheet`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("letter-sheet"))
        .unwrap_or_else(|| PathBuf::from(".letter-sheet"))
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        check_quota(self.quota, value.len())?;
        self.ensure_dir()?;

        // Write beside the target and rename so a failed write never truncates it
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("sheet").unwrap(), None);
        store.set("sheet", "{\"notes\":\"hi\"}").unwrap();

        let reopened = FileStore::new(dir.path().join("nested"));
        assert_eq!(
            reopened.get("sheet").unwrap().as_deref(),
            Some("{\"notes\":\"hi\"}")
        );
        assert!(!dir.path().join("nested").join("sheet.json.tmp").exists());
    }

    #[test]
    fn test_quota_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).with_quota(3);
        store.set("k", "abc").unwrap();
        assert!(store.set("k", "abcd").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_unwritable_dir_reports_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let mut store = FileStore::new(blocker.join("sub"));
        assert!(matches!(
            store.set("k", "v"),
            Err(StoreError::Io { .. })
        ));
    }
}
