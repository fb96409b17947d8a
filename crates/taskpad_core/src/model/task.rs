//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its stable identity.
//! - Pin the wire field names used by persisted payloads.
//!
//! # Invariants
//! - A generated `TaskId` is never reused for another task.
//! - The text field serializes as `task`, never `text` — payloads written by
//!   earlier app versions must keep loading unchanged.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Newly created tasks get a generated UUID string, but the type stays an
/// opaque string wrapper: payloads persisted by earlier app versions used
/// the raw task text as the id, and those ids must keep round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh unique id, decoupled from the task text.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id value, e.g. one handed back by the UI layer.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single user-entered to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used by the UI layer to request deletion.
    pub id: TaskId,
    /// Serialized as `task` to match the persisted payload schema.
    #[serde(rename = "task")]
    pub text: String,
}

impl Task {
    /// Creates a task with a generated stable id.
    ///
    /// Callers are expected to have rejected blank text already; this
    /// constructor does not validate.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into(),
        }
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by hydration, where identity already exists in storage.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskId};

    #[test]
    fn generated_ids_are_unique() {
        let a = Task::new("same text");
        let b = Task::new("same text");
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn with_id_preserves_legacy_identity() {
        let task = Task::with_id(TaskId::from_raw("Buy milk"), "Buy milk");
        assert_eq!(task.id.as_str(), "Buy milk");
    }

    #[test]
    fn text_serializes_under_wire_name_task() {
        let task = Task::with_id(TaskId::from_raw("X"), "line1\nline2");
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"task\""));
        assert!(!json.contains("\"text\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
