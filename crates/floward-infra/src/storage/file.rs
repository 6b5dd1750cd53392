//! Durable key-value store backed by a single JSON file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use floward_core::ports::{KeyValueStore, StorageError};

pub const STORAGE_FILENAME: &str = "storage.json";

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a JSON object.
///
/// The file is read on open and rewritten on every change; writes go to a
/// sibling temp file that is then renamed over the original.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories. A missing file is
    /// an empty store; an unreadable one is reset.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(format!("Creating {}: {}", parent.display(), e)))?;
        }

        let entries = load(&path).await?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open `storage.json` in the `floward` folder of the user's data directory.
    #[cfg(feature = "file-store")]
    pub async fn open_default() -> Result<Self, StorageError> {
        let mut path = dirs::data_dir()
            .ok_or_else(|| StorageError::Io("Failed to get default data directory".to_string()))?;
        path.push("floward");
        path.push(STORAGE_FILENAME);
        Self::open(path).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &Entries) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &content)
            .await
            .map_err(|e| StorageError::Io(format!("Writing {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Io(format!("Replacing {}: {}", self.path.display(), e)))
    }
}

async fn load(path: &Path) -> Result<Entries, StorageError> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => return Err(StorageError::Io(format!("Reading {}: {}", path.display(), e))),
    };

    match serde_json::from_slice(&content) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Storage file is corrupt, resetting");
            Ok(Entries::new())
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&entries).await {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries).await {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
