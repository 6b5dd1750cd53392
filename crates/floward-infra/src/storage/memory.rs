//! In-memory key-value store - used when nothing should outlive the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use floward_core::ports::{KeyValueStore, StorageError};

/// In-memory store using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();
        store.set("access_token", "A").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), Some("A".to_string()));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = InMemoryStore::new();
        store.set("email", "old@example.com").await.unwrap();
        store.set("email", "new@example.com").await.unwrap();
        assert_eq!(
            store.get("email").await.unwrap().as_deref(),
            Some("new@example.com")
        );
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryStore::new();
        store.set("refresh_token", "B").await.unwrap();
        store.remove("refresh_token").await.unwrap();
        assert_eq!(store.get("refresh_token").await.unwrap(), None);
    }
}
