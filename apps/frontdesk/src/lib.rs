//! # Pousada Front Desk Library
//!
//! Opens the local store, loads the hotel and answers JSON commands, one per
//! line, until stdin closes.
//!
//! ## Module Organization
//! ```text
//! pousada_frontdesk/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── desk.rs     ◄─── FrontDesk: hotel, screen, persistence
//! │   ├── checkout.rs ◄─── Transient checkout session
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── Command enum and handlers
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Streams
//! - stdin: one JSON command per line
//! - stdout: one JSON response per line, nothing else
//! - stderr: logs

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use pousada_store::{HotelRepository, SqliteStore, StoreConfig, StoreError};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use state::{ConfigState, FrontDesk};

/// Failures that stop the front desk from starting or answering.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Could not encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Runs the front desk.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (stderr, RUST_LOG or default filter)             │
/// │  2. Read configuration (POUSADA_* environment variables)                │
/// │  3. Open SQLite store & run migrations                                  │
/// │  4. Load every collection (missing/malformed → defaults)                │
/// │  5. Answer commands until stdin closes                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting Pousada front desk");

    let config = ConfigState::from_env();
    let store_path = get_store_path(&config)?;
    info!(?store_path, "Store path determined");

    let store = SqliteStore::open(StoreConfig::new(store_path)).await?;
    let repo = HotelRepository::new(Arc::new(store.clone()));
    let mut desk = FrontDesk::load(repo, config).await;

    serve(&mut desk).await?;

    store.close().await;
    info!("Front desk stopped");
    Ok(())
}

/// Answers stdin lines until EOF.
pub async fn serve(desk: &mut FrontDesk) -> Result<(), StartupError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = commands::handle_line(desk, &line).await;
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }

    debug!("stdin closed");
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pousada=trace` - Show trace for pousada crates only
/// - Default: `info,pousada=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pousada=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the store file path.
///
/// `POUSADA_STORE_PATH` wins; otherwise `pousada.db` in the platform data
/// directory, which is created if missing.
fn get_store_path(config: &ConfigState) -> Result<PathBuf, StartupError> {
    if let Some(path) = &config.store_path {
        return Ok(path.clone());
    }

    let proj_dirs =
        ProjectDirs::from("com", "pousada", "frontdesk").ok_or(StartupError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("pousada.db"))
}
