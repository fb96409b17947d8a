//! Developer smoke probe for the task-list core.
//!
//! Exercises the full hydrate/add/delete/flush path against an in-memory
//! store so core wiring can be checked without the mobile shell. Output is
//! deterministic.

use taskpad_core::{MemoryStorage, TaskStore};

fn main() {
    println!(
        "taskpad_core version={} ping={}",
        taskpad_core::core_version(),
        taskpad_core::ping()
    );

    let mut store = TaskStore::hydrate(MemoryStorage::new());
    store.add("smoke: first task");
    let id = store.add("smoke: second task")[1].id.clone();
    store.delete(&id);
    store.flush();

    println!("store add/delete/flush ok count={}", store.len());
}
