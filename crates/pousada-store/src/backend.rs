//! # Key-Value Backends
//!
//! The storage seam every repository goes through.
//!
//! ```text
//! ┌────────────────────────┐
//! │  Repository<T>         │  typed, one key per collection
//! └───────────┬────────────┘
//!             │ raw JSON text
//! ┌───────────▼────────────┐
//! │  dyn KeyValueStore     │
//! ├────────────┬───────────┤
//! │ MemoryStore│SqliteStore│
//! │  (tests)   │ (pool.rs) │
//! └────────────┴───────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;

/// String keys mapped to serialized values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// All keys currently stored, sorted.
    async fn keys(&self) -> StoreResult<Vec<String>>;
}

/// In-memory store, used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with raw values.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.values.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").await.unwrap(), None);

        store.set("theme", "\"dark\"").await.unwrap();
        store.set("rooms", "[]").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(store.keys().await.unwrap(), vec!["rooms", "theme"]);

        store.remove("theme").await.unwrap();
        store.remove("theme").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), None);
    }
}
