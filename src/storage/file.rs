use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::warn;

use super::{config_dir, KeyValueStore, StorageError};
use crate::config::StorageConfig;

const SESSION_FILE: &str = "session.json";

/// JSON-file store: one flat object of string values in `<config dir>/session.json`.
///
/// Each operation re-reads the file so that several processes sharing the directory
/// see each other's writes. Concurrent writers are not coordinated; the last write wins.
/// Writes go to a temporary file in the same directory that is then renamed over the
/// session file, so a reader sees either the old or the new content.
///
/// Reads report a file that is not valid JSON. Writes replace it: it holds no usable
/// session, and refusing to write would leave logout unable to clear it.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let dir = config_dir(config)?;
        Ok(Self::at(dir.join(SESSION_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Entries for a read-modify-write, and whether unreadable content was dropped.
    fn load_for_update(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable session file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut entries, _) = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut entries, discarded) = self.load_for_update()?;
        if entries.remove(key).is_some() || discarded {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            config_dir: Some(tmp.path().to_path_buf()),
        };

        let store = FileStore::open(&config).unwrap();
        store.set("authToken", "abc").unwrap();
        drop(store);

        let reopened = FileStore::open(&config).unwrap();
        assert_eq!(reopened.get("authToken").unwrap().as_deref(), Some("abc"));
        assert!(reopened.path().ends_with("session.json"));
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::at(tmp.path().join("session.json"));

        store.remove("currentUser").unwrap();
        assert!(!store.path().exists());

        store.set("currentUser", "{}").unwrap();
        store.remove("currentUser").unwrap();
        assert_eq!(store.get("currentUser").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::at(path);
        assert!(matches!(store.get("authToken"), Err(StorageError::Json(_))));
    }

    #[test]
    fn truncated_file_is_replaced_by_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{\"currentUser\": \"{\\\"id\\\": \"").unwrap();

        let store = FileStore::at(path.clone());
        store.remove("currentUser").unwrap();
        assert_eq!(store.get("currentUser").unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");

        fs::write(&path, "{\"authToken\": ").unwrap();
        store.set("authToken", "abc").unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn writes_leave_no_temporary_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::at(tmp.path().join("session.json"));
        store.set("authToken", "abc").unwrap();
        store.set("currentUser", "{}").unwrap();
        store.remove("authToken").unwrap();

        let names = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["session.json"]);
    }
}
