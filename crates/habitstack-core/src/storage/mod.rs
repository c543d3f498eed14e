//! Persistence around the ledger.
//!
//! The ledger itself never touches storage. A [`LedgerRepository`] maps it to
//! a handful of JSON blobs in any [`KeyValueStore`]; [`Database`] is the
//! SQLite-backed store used by the CLI and [`MemoryStore`] backs tests.

mod config;
pub mod database;
pub mod repository;

pub use config::{Config, DisplayConfig, LedgerConfig, ProfileConfig};
pub use database::Database;
pub use repository::{keys, LedgerRepository};

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// Environment variable that overrides the data directory outright.
pub const DATA_DIR_ENV: &str = "HABITSTACK_DATA_DIR";

/// A flat string-to-string blob store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store with no durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `HABITSTACK_DATA_DIR` wins if set. Otherwise `~/.config/habitstack/`, or
/// `~/.config/habitstack-dev/` when `HABITSTACK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITSTACK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitstack-dev")
            } else {
                base_dir.join("habitstack")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
