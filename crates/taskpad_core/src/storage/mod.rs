//! Durable key-value storage contract and backends.
//!
//! # Responsibility
//! - Define the `PersistenceAdapter` contract the task store depends on.
//! - Isolate SQLite details from state management.
//!
//! # Invariants
//! - `set` durably overwrites any prior value for the key.
//! - Adapters never interpret stored values; payload shape is the store's
//!   concern.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryStorage;
pub use migrations::latest_version;
pub use sqlite::SqliteKeyValueStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by storage backends.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable local key-value storage the task store persists through.
///
/// Matches the mobile-platform storage shape: string keys to string values,
/// absent keys read back as `None`, writes are full overwrites.
pub trait PersistenceAdapter {
    /// Returns the stored value for `key`, or `None` if never set.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Durably stores `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
