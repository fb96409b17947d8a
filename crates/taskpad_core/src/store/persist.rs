//! Single-writer persistence queue.
//!
//! # Responsibility
//! - Apply full-collection writes to storage in mutation order, off the
//!   caller's thread.
//!
//! # Invariants
//! - Writes are applied strictly in enqueue order; the last applied write
//!   reflects the latest collection state.
//! - Write failures are logged and dropped; the queue keeps running.
//! - Dropping the queue drains all pending writes before joining the writer.

use crate::storage::PersistenceAdapter;
use log::{debug, error};
use std::sync::mpsc;
use std::thread::{Builder, JoinHandle};

enum WriterMessage {
    Write { payload: String },
    Flush { done: mpsc::Sender<()> },
}

/// Background writer owning the storage adapter after hydration.
pub struct PersistQueue {
    sender: Option<mpsc::Sender<WriterMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistQueue {
    /// Moves `adapter` into a dedicated writer thread that stores every
    /// enqueued payload under `key`.
    pub fn spawn<S>(adapter: S, key: &'static str) -> Self
    where
        S: PersistenceAdapter + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<WriterMessage>();

        let spawned = Builder::new()
            .name("taskpad-persist".to_string())
            .spawn(move || writer_loop(adapter, key, receiver));

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                // Receiver is gone; enqueue degrades to logged no-ops.
                error!(
                    "event=persist_spawn module=store status=error error={}",
                    err
                );
                None
            }
        };

        Self {
            sender: Some(sender),
            handle,
        }
    }

    /// Schedules one full-overwrite write. Fire-and-forget.
    pub fn enqueue(&self, payload: String) {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };
        if sender.send(WriterMessage::Write { payload }).is_err() {
            error!("event=persist_enqueue module=store status=error error=writer_unavailable");
        }
    }

    /// Blocks until every write enqueued before this call has been applied.
    pub fn flush(&self) {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };
        let (done, ready) = mpsc::channel();
        if sender.send(WriterMessage::Flush { done }).is_ok() {
            let _ = ready.recv();
        }
    }
}

impl Drop for PersistQueue {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain remaining messages.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn writer_loop<S: PersistenceAdapter>(
    adapter: S,
    key: &'static str,
    receiver: mpsc::Receiver<WriterMessage>,
) {
    while let Ok(message) = receiver.recv() {
        match message {
            WriterMessage::Write { payload } => match adapter.set(key, &payload) {
                Ok(()) => {
                    debug!(
                        "event=persist module=store status=ok bytes={}",
                        payload.len()
                    );
                }
                Err(err) => {
                    error!("event=persist module=store status=error error={}", err);
                }
            },
            WriterMessage::Flush { done } => {
                let _ = done.send(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PersistQueue;
    use crate::storage::{MemoryStorage, PersistenceAdapter};

    #[test]
    fn writes_apply_in_enqueue_order() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        let queue = PersistQueue::spawn(storage, "@task");
        queue.enqueue("[\"stale\"]".to_string());
        queue.enqueue("[\"latest\"]".to_string());
        queue.flush();

        assert_eq!(
            observer.get("@task").unwrap().as_deref(),
            Some("[\"latest\"]")
        );
    }

    #[test]
    fn drop_drains_pending_writes() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        {
            let queue = PersistQueue::spawn(storage, "@task");
            queue.enqueue("[]".to_string());
        }

        assert_eq!(observer.get("@task").unwrap().as_deref(), Some("[]"));
    }
}
