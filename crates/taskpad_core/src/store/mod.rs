//! Task-list state management.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection.
//! - Keep it synchronized with durable storage through the adapter contract.
//!
//! # Invariants
//! - In-memory state always wins over storage state.
//! - Every scheduled write carries the full collection as it existed at
//!   schedule time; the last write reflects the latest state.

pub mod codec;
pub mod persist;
pub mod task_store;
