//! Core domain logic for Taskpad.
//! This crate is the single source of truth for task-list state and its
//! persistence contract; UI layers only render snapshots and call back in.

pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{active_log_dir, default_log_level, init_logging};
pub use model::task::{Task, TaskId};
pub use storage::{
    MemoryStorage, PersistenceAdapter, SqliteKeyValueStorage, StorageError, StorageResult,
};
pub use store::codec::{decode_tasks, encode_tasks, CodecError};
pub use store::task_store::{TaskStore, BACKUP_STORAGE_KEY, STORAGE_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
