//! Wire codec for persisted task collections.
//!
//! # Responsibility
//! - Encode/decode the JSON array payload stored under the task key.
//!
//! # Invariants
//! - Wire shape is `[{"id": string, "task": string}, ...]`, field names
//!   fixed for compatibility with payloads written by earlier app versions.
//! - Decoding preserves element order.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for payloads that are not a valid serialized task collection.
#[derive(Debug)]
pub struct CodecError(serde_json::Error);

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid task collection payload: {}", self.0)
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Serializes the full collection to its wire form.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(CodecError)
}

/// Deserializes a wire payload into an ordered collection.
pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(payload).map_err(CodecError)
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks};
    use crate::model::task::{Task, TaskId};

    #[test]
    fn encode_uses_exact_wire_field_names() {
        let tasks = vec![Task::with_id(TaskId::from_raw("X"), "X")];
        let payload = encode_tasks(&tasks).unwrap();
        assert_eq!(payload, r#"[{"id":"X","task":"X"}]"#);
    }

    #[test]
    fn decode_accepts_legacy_text_as_id_payloads() {
        let tasks = decode_tasks(r#"[{"id":"X","task":"X"}]"#).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.as_str(), "X");
        assert_eq!(tasks[0].text, "X");
    }

    #[test]
    fn round_trip_preserves_ids_text_and_order() {
        let tasks = vec![
            Task::new("first"),
            Task::new("second\nwith newline"),
            Task::new("third"),
        ];

        let decoded = decode_tasks(&encode_tasks(&tasks).unwrap()).unwrap();
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn decode_rejects_non_array_payloads() {
        assert!(decode_tasks("not json").is_err());
        assert!(decode_tasks(r#"{"id":"X","task":"X"}"#).is_err());
    }

    #[test]
    fn empty_collection_encodes_as_empty_array() {
        assert_eq!(encode_tasks(&[]).unwrap(), "[]");
        assert!(decode_tasks("[]").unwrap().is_empty());
    }
}
