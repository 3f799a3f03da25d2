//! File-backed secure storage: one file per key in a directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SecureStorage, validate_key};
use crate::error::StoreError;

/// Storage that keeps each key in its own file under `dir`.
///
/// Writes go to a temporary sibling first and are then renamed into
/// place, so a reader never sees a half-written value. Encryption at rest
/// is left to the platform (e.g. an encrypted app-data volume).
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

fn io_error(op: &str, key: &str, err: &std::io::Error) -> StoreError {
    StoreError::Storage(format!("{op} {key:?}: {err}"))
}

impl SecureStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", key, &e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error("create dir for", key, &e))?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| io_error("write", key, &e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error("rename", key, &e))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("delete", key, &e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    #[tokio::test]
    async fn persists_across_instances() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let root = dir.path().join("nested");

        let storage = FileStorage::new(&root);
        assert_ok!(storage.set("user-state", "{\"a\":1}").await);

        let reopened = FileStorage::new(&root);
        let Ok(value) = reopened.get("user-state").await else {
            panic!("read failed");
        };
        assert_eq!(value.as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn missing_key_reads_none_and_deletes_cleanly() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let storage = FileStorage::new(dir.path());
        assert!(matches!(storage.get("absent").await, Ok(None)));
        assert_ok!(storage.delete("absent").await);
    }

    #[tokio::test]
    async fn overwrite_and_delete() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let storage = FileStorage::new(dir.path());
        assert_ok!(storage.set("k", "one").await);
        assert_ok!(storage.set("k", "two").await);
        assert_eq!(storage.get("k").await.ok().flatten().as_deref(), Some("two"));
        assert_ok!(storage.delete("k").await);
        assert!(matches!(storage.get("k").await, Ok(None)));
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set("../escape", "x").await,
            Err(StoreError::InvalidStorageKey(_))
        ));
    }
}
