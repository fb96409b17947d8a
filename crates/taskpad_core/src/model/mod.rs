//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, codec and FFI layers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned at creation.
//! - Task text is stored exactly as the user entered it.

pub mod task;
