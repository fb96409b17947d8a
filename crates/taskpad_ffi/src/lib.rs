//! FFI crate exposing the task-list core to the mobile shell.

pub mod api;
