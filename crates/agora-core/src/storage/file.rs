//! Directory-backed store shared between processes.
//!
//! Each key lives in `<dir>/<key>.json`. Writes go to a hidden temp file that
//! is renamed over the target, so a reader sees either the old or the new
//! value, never a partial one. Changes made by any process are picked up by a
//! filesystem watcher and announced on the change stream.
//!
//! The watcher cannot tell who wrote a file, so writes made through this
//! handle are announced back to its own subscribers as well. That only costs
//! an extra reconciliation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{ChangeStream, ContextId, PersistedStore, StoreChange, CHANGE_CHANNEL_CAPACITY};
use crate::error::{ContentError, ContentResult};

const VALUE_EXTENSION: &str = "json";

/// Key/value store kept as one JSON file per key in a directory.
pub struct FileStore {
    dir: PathBuf,
    id: ContextId,
    changes: broadcast::Sender<StoreChange>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> ContentResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        info!(?dir, "Opened file store");

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            dir,
            id: ContextId::next(),
            changes,
            watcher: Mutex::new(None),
        })
    }

    /// The directory holding the values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> ContentResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    /// Atomically replace the value stored under `key`.
    pub fn set_item(&self, key: &str, value: &str) -> ContentResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.{}.tmp", std::process::id()));
        std::fs::write(&tmp, value)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Remove `key`; removing an absent key is not an error.
    pub fn remove_item(&self, key: &str) -> ContentResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Start the filesystem watcher if it is not already running.
    pub fn watch(&self) -> ContentResult<()> {
        let mut slot = self.watcher.lock();
        if slot.is_some() {
            return Ok(());
        }

        let changes = self.changes.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    if !matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        return;
                    }
                    for key in event.paths.iter().filter_map(|p| key_for_path(p)) {
                        let _ = changes.send(StoreChange {
                            key: Some(key),
                            origin: ContextId::EXTERNAL,
                        });
                    }
                }
                Err(e) => warn!(error = %e, "File store watcher error"),
            },
            notify::Config::default(),
        )?;
        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;
        debug!(dir = ?self.dir, "Watching file store for changes");

        *slot = Some(watcher);
        Ok(())
    }
}

impl PersistedStore for FileStore {
    fn get_item(&self, key: &str) -> ContentResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn subscribe(&self) -> Option<ChangeStream> {
        if let Err(e) = self.watch() {
            warn!(error = %e, "Change notifications unavailable, relying on polling");
            return None;
        }
        Some(ChangeStream::new(self.changes.subscribe(), self.id))
    }
}

fn validate_key(key: &str) -> ContentResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(ContentError::InvalidKey(key.to_string()))
    }
}

fn key_for_path(path: &Path) -> Option<String> {
    if path.extension()? != VALUE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    validate_key(stem).ok()?;
    Some(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("store")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_store_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested/path/store");
        let store = FileStore::open(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[test]
    fn test_set_and_get_item() {
        let (store, _temp) = create_test_store();

        assert!(store.get_item("agoraEvents").unwrap().is_none());
        store.set_item("agoraEvents", "[]").unwrap();
        assert_eq!(store.get_item("agoraEvents").unwrap().as_deref(), Some("[]"));

        store.set_item("agoraEvents", r#"[{"x":1}]"#).unwrap();
        assert_eq!(
            store.get_item("agoraEvents").unwrap().as_deref(),
            Some(r#"[{"x":1}]"#)
        );
    }

    #[test]
    fn test_values_persist_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("store");

        FileStore::open(&dir)
            .unwrap()
            .set_item("agoraGalleryImages", "[]")
            .unwrap();

        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(
            reopened.get_item("agoraGalleryImages").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (store, _temp) = create_test_store();
        store.set_item("agoraEvents", "[]").unwrap();

        let names: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["agoraEvents.json".to_string()]);
    }

    #[test]
    fn test_remove_item() {
        let (store, _temp) = create_test_store();
        store.set_item("agoraEvents", "[]").unwrap();
        store.remove_item("agoraEvents").unwrap();
        assert!(store.get_item("agoraEvents").unwrap().is_none());
        assert!(store.remove_item("agoraEvents").is_ok());
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let (store, _temp) = create_test_store();
        for key in ["", "../escape", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(store.get_item(key), Err(ContentError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
            assert!(store.set_item(key, "[]").is_err());
        }
    }

    #[test]
    fn test_key_for_path() {
        assert_eq!(
            key_for_path(Path::new("/tmp/store/agoraEvents.json")).as_deref(),
            Some("agoraEvents")
        );
        assert_eq!(key_for_path(Path::new("/tmp/store/.agoraEvents.42.tmp")), None);
        assert_eq!(key_for_path(Path::new("/tmp/store/notes.txt")), None);
    }

    #[tokio::test]
    async fn test_external_write_is_announced() {
        let (store, _temp) = create_test_store();
        let mut changes = store.subscribe().expect("watcher should start");

        // Another process writing the same directory
        let writer = FileStore::open(store.dir()).unwrap();
        writer.set_item("agoraEvents", "[]").unwrap();

        let change = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                let change = changes.recv().await.unwrap();
                if change.key.as_deref() == Some("agoraEvents") {
                    return change;
                }
            }
        })
        .await
        .expect("change should be announced");
        assert_eq!(change.origin, ContextId::EXTERNAL);
    }

    #[test]
    fn test_watch_is_idempotent() {
        let (store, _temp) = create_test_store();
        store.watch().unwrap();
        store.watch().unwrap();
        assert!(store.watcher.lock().is_some());
    }
}
