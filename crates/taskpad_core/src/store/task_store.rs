//! Authoritative task-list store.
//!
//! # Responsibility
//! - Own the ordered task collection for the process lifetime.
//! - Hydrate from storage at startup and schedule a full-overwrite write
//!   after every mutation.
//!
//! # Invariants
//! - Mutations complete against in-memory state before any write is
//!   dispatched; the scheduled payload is the collection at call time.
//! - No failure in this module reaches the UI: blank adds and unknown-id
//!   deletes are silent no-ops, corrupt stored state degrades to an empty
//!   collection without destroying the raw payload.

use crate::model::task::{Task, TaskId};
use crate::storage::PersistenceAdapter;
use crate::store::codec::{decode_tasks, encode_tasks};
use crate::store::persist::PersistQueue;
use log::{debug, error, info};

/// Fixed storage key for the serialized task collection.
///
/// Kept verbatim from earlier app versions so existing devices hydrate
/// their saved lists.
pub const STORAGE_KEY: &str = "@task";

/// Key under which an undecodable payload is preserved before the store
/// continues with an empty collection.
pub const BACKUP_STORAGE_KEY: &str = "@task.corrupt";

/// Owns the in-memory task collection and its persistence lifecycle.
///
/// The rendering layer reads snapshots via [`TaskStore::tasks`] and calls
/// back into [`TaskStore::add`] and [`TaskStore::delete`]; it never touches
/// storage directly.
pub struct TaskStore {
    tasks: Vec<Task>,
    queue: PersistQueue,
}

impl TaskStore {
    /// Loads the persisted collection and becomes the source of truth.
    ///
    /// Hydration never fails: an absent value yields an empty collection, an
    /// undecodable value is copied to [`BACKUP_STORAGE_KEY`] and replaced by
    /// an empty collection, and a read error degrades to empty with the
    /// error logged. The adapter then moves into the background writer.
    pub fn hydrate<S>(adapter: S) -> Self
    where
        S: PersistenceAdapter + Send + 'static,
    {
        let tasks = match adapter.get(STORAGE_KEY) {
            Ok(None) => {
                info!("event=hydrate module=store status=ok source=empty count=0");
                Vec::new()
            }
            Ok(Some(payload)) => match decode_tasks(&payload) {
                Ok(tasks) => {
                    info!(
                        "event=hydrate module=store status=ok source=storage count={}",
                        tasks.len()
                    );
                    tasks
                }
                Err(err) => {
                    error!(
                        "event=hydrate module=store status=degraded reason=corrupt_payload bytes={} error={}",
                        payload.len(),
                        err
                    );
                    // Keep the raw payload out of the overwrite path so the
                    // next write cannot silently destroy it.
                    if let Err(backup_err) = adapter.set(BACKUP_STORAGE_KEY, &payload) {
                        error!(
                            "event=hydrate_backup module=store status=error error={}",
                            backup_err
                        );
                    }
                    Vec::new()
                }
            },
            Err(err) => {
                error!(
                    "event=hydrate module=store status=degraded reason=read_failed error={}",
                    err
                );
                Vec::new()
            }
        };

        Self {
            tasks,
            queue: PersistQueue::spawn(adapter, STORAGE_KEY),
        }
    }

    /// Read-only snapshot for the rendering layer.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks currently in the collection.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task with a generated id and schedules a persist.
    ///
    /// Blank input (empty or whitespace-only) is a silent no-op. The text is
    /// stored exactly as entered, newlines included.
    pub fn add(&mut self, text: &str) -> &[Task] {
        if text.trim().is_empty() {
            debug!("event=add module=store status=noop reason=blank_text");
            return &self.tasks;
        }

        self.tasks.push(Task::new(text));
        info!("event=add module=store status=ok count={}", self.tasks.len());
        self.schedule_persist();
        &self.tasks
    }

    /// Removes the first task with the given id and schedules a persist.
    ///
    /// Unknown ids are a silent no-op; nothing changed, so nothing is
    /// written.
    pub fn delete(&mut self, id: &TaskId) -> &[Task] {
        let Some(position) = self.tasks.iter().position(|task| task.id == *id) else {
            debug!("event=delete module=store status=noop reason=unknown_id id={id}");
            return &self.tasks;
        };

        self.tasks.remove(position);
        info!(
            "event=delete module=store status=ok id={id} count={}",
            self.tasks.len()
        );
        self.schedule_persist();
        &self.tasks
    }

    /// Blocks until every persist scheduled so far has been applied.
    ///
    /// Used at shutdown (app backgrounding) and by tests; normal mutation
    /// paths never wait on storage.
    pub fn flush(&self) {
        self.queue.flush();
    }

    fn schedule_persist(&self) {
        match encode_tasks(&self.tasks) {
            Ok(payload) => self.queue.enqueue(payload),
            // Unreachable for this model shape, but a failed encode must
            // never take the store down.
            Err(err) => error!("event=persist_encode module=store status=error error={}", err),
        }
    }
}
