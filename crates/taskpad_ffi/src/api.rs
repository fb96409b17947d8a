//! FFI use-case API for the mobile rendering layer.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI shell.
//! - Keep error semantics simple: envelopes, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The process-wide store is hydrated exactly once.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    SqliteKeyValueStorage, TaskId, TaskStore,
};

const STORE_DB_FILE_NAME: &str = "taskpad.sqlite3";
static STORE: OnceLock<Mutex<TaskStore>> = OnceLock::new();

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: any level spec the logger backend accepts (`info`, `debug`, ...).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - The first successful call wins; later calls are no-ops that return
///   success.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens device storage under `data_dir` and hydrates the task store.
///
/// # FFI contract
/// - Sync call; performs one storage read.
/// - Idempotent: repeated calls after a successful init are no-ops.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(data_dir: String) -> String {
    if STORE.get().is_some() {
        return String::new();
    }

    let db_path = PathBuf::from(data_dir).join(STORE_DB_FILE_NAME);
    let storage = match SqliteKeyValueStorage::open(&db_path) {
        Ok(storage) => storage,
        Err(err) => {
            log::error!("event=store_init module=ffi status=error error={err}");
            return format!("failed to open task storage: {err}");
        }
    };

    // A racing second init loses; its hydrated store is dropped.
    let _ = STORE.set(Mutex::new(TaskStore::hydrate(storage)));
    log::info!("event=store_init module=ffi status=ok");
    String::new()
}

/// Task item handed to the UI for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task id in string form; the UI passes it back to delete.
    pub id: String,
    /// User-entered task text.
    pub text: String,
}

/// Snapshot response for the list flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Current collection in insertion order (empty before init).
    pub items: Vec<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation changed the collection.
    pub ok: bool,
    /// Id of the affected task, when one exists.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn changed(message: impl Into<String>, task_id: String) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Appends a task and schedules a background persist.
///
/// Blank text leaves the collection unchanged (`ok = false`), matching the
/// store's silent-rejection contract.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(text: String) -> TaskActionResponse {
    let Some(store) = STORE.get() else {
        return TaskActionResponse::unchanged("store not initialized; call init_store first");
    };

    let mut store = lock_store(store);
    let before = store.len();
    let snapshot = store.add(&text);

    if snapshot.len() == before {
        return TaskActionResponse::unchanged("blank task text; nothing added");
    }

    let id = snapshot[snapshot.len() - 1].id.to_string();
    TaskActionResponse::changed("task added", id)
}

/// Deletes the task with the given id and schedules a background persist.
///
/// Unknown ids leave the collection unchanged (`ok = false`).
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> TaskActionResponse {
    let Some(store) = STORE.get() else {
        return TaskActionResponse::unchanged("store not initialized; call init_store first");
    };

    let mut store = lock_store(store);
    let before = store.len();
    let task_id = TaskId::from_raw(id.clone());

    if store.delete(&task_id).len() == before {
        return TaskActionResponse::unchanged("no task with the given id; nothing deleted");
    }

    TaskActionResponse::changed("task deleted", id)
}

/// Returns the current collection snapshot for rendering.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TaskListResponse {
    let Some(store) = STORE.get() else {
        return TaskListResponse {
            items: Vec::new(),
            message: "store not initialized; call init_store first".to_string(),
        };
    };

    let store = lock_store(store);
    let items = store
        .tasks()
        .iter()
        .map(|task| TaskItem {
            id: task.id.to_string(),
            text: task.text.clone(),
        })
        .collect::<Vec<_>>();

    TaskListResponse {
        items,
        message: String::new(),
    }
}

/// Blocks until all scheduled persists have been applied.
///
/// The shell calls this when the app is backgrounded, bounding how much a
/// process kill can lose.
#[flutter_rust_bridge::frb(sync)]
pub fn flush_tasks() -> String {
    match STORE.get() {
        Some(store) => {
            lock_store(store).flush();
            String::new()
        }
        None => "store not initialized; call init_store first".to_string(),
    }
}

// A panicking mutation can poison the lock; the data under it is still the
// authoritative in-memory state, so recover rather than panic across FFI.
fn lock_store(store: &Mutex<TaskStore>) -> MutexGuard<'_, TaskStore> {
    store
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::{add_task, core_version, delete_task, flush_tasks, list_tasks, ping};

    // Store-backed calls before init must fail soft, not panic.
    #[test]
    fn calls_before_init_degrade_gracefully() {
        assert!(!add_task("anything".to_string()).ok);
        assert!(!delete_task("anything".to_string()).ok);
        assert!(list_tasks().items.is_empty());
        assert!(!flush_tasks().is_empty());
    }

    #[test]
    fn smoke_calls_answer() {
        assert_eq!(ping(), "pong");
        assert!(!core_version().is_empty());
    }
}
