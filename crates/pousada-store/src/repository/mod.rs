//! # Repository Module
//!
//! Typed access to the persisted collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Front desk command                                                     │
//! │       │                                                                 │
//! │       │  hotel_repo.save_dirty(&mut hotel)                              │
//! │       ▼                                                                 │
//! │  HotelRepository                                                        │
//! │  ├── load()            every collection, tolerant                       │
//! │  └── save(collection)  whole-collection replace                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository<T>   one key ↔ one JSON value                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dyn KeyValueStore                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tolerant Loading
//! A missing key, an empty value, unreadable storage and malformed JSON all
//! yield the collection's default (empty list, light theme). Only the last
//! two are logged; none of them reaches the caller.

pub mod hotel;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::KeyValueStore;
use crate::error::{StoreError, StoreResult};

pub use hotel::HotelRepository;

/// One persisted value stored under a fixed key.
pub struct Repository<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            store: Arc::clone(&self.store),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Repository {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads and decodes the value. `Ok(None)` when nothing usable is stored.
    pub async fn try_load(&self) -> StoreResult<Option<T>> {
        let raw = match self.store.get(self.key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::serialization(self.key, e))
    }

    /// Reads the value, falling back to the default on any failure.
    pub async fn load(&self) -> T {
        match self.try_load().await {
            Ok(Some(value)) => {
                debug!(key = self.key, "Loaded collection");
                value
            }
            Ok(None) => {
                debug!(key = self.key, "Key missing, using default");
                T::default()
            }
            Err(e) => {
                warn!(key = self.key, error = %e, "Failed to read stored value, using default");
                T::default()
            }
        }
    }

    /// Replaces the stored value.
    pub async fn save(&self, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::serialization(self.key, e))?;
        self.store.set(self.key, &raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
