//! # pousada-store: Persisted State for Pousada
//!
//! Every persisted collection lives under its own key as one JSON value.
//! Writes replace the whole value; reads never fail.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pousada Data Flow                                │
//! │                                                                         │
//! │  Front desk command (check_in)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  pousada-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │ SqliteStore   │    │ Repositories   │    │  Migrations  │  │   │
//! │  │   │  (pool.rs)    │    │ HotelRepository│    │  (embedded)  │  │   │
//! │  │   │ MemoryStore   │◄───│ Repository<T>  │    │ 001_kv.sql   │  │   │
//! │  │   │ (backend.rs)  │    │                │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/pousada.db  (table kv_store)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pousada_store::{HotelRepository, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::open(StoreConfig::new("pousada.db")).await?;
//! let repo = HotelRepository::new(Arc::new(store));
//!
//! let mut hotel = repo.load().await;
//! hotel.add_inventory_room("101", "", vec![])?;
//! repo.save_dirty(&mut hotel).await?;
//! ```

pub mod backend;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use backend::{KeyValueStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use pool::{SqliteStore, StoreConfig};
pub use repository::{HotelRepository, Repository};
