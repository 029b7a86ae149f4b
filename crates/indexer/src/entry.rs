//! Log entry envelope and operation kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One record in the append-only board operation log; the unit of replay.
///
/// Envelope fields (`entity_id`, `timestamp`) are authoritative fallbacks
/// when the JSON payload omits them, so producers can send minimal bodies
/// for entity-id-only operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLogEntry {
    /// Strictly increasing per log; the replay cursor unit.
    pub seq_num: i64,
    /// RFC 3339 timestamp assigned by the log producer.
    #[serde(default)]
    pub timestamp: String,
    /// Operation kind; unrecognized kinds are tolerated and skipped.
    pub operation: String,
    /// Target entity id. Required for entity-id-only operations.
    #[serde(default)]
    pub entity_id: String,
    /// JSON-encoded entity payload; empty for entity-id-only operations.
    #[serde(default)]
    pub data: String,
    /// Producer signature over the entry. Verification is a precondition
    /// enforced upstream by the transport; carried opaquely here.
    #[serde(default)]
    pub signature: String,
}

/// Known operation kinds, plus a forward-compatible default.
///
/// Parsing never fails: an unrecognized kind maps to [`Operation::Unknown`],
/// which the replayer treats as a no-op that still advances the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateBoard,
    UpdateBoard,
    CreateThread,
    CloseThread,
    CreatePost,
    DeletePost,
    Unknown,
}

impl Operation {
    /// Map a log operation string to its kind.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "create_board" => Operation::CreateBoard,
            "update_board" => Operation::UpdateBoard,
            "create_thread" => Operation::CreateThread,
            "close_thread" => Operation::CloseThread,
            "create_post" => Operation::CreatePost,
            "delete_post" => Operation::DeletePost,
            _ => Operation::Unknown,
        }
    }

    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateBoard => "create_board",
            Operation::UpdateBoard => "update_board",
            Operation::CreateThread => "create_thread",
            Operation::CloseThread => "close_thread",
            Operation::CreatePost => "create_post",
            Operation::DeletePost => "delete_post",
            Operation::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(Operation::parse("create_board"), Operation::CreateBoard);
        assert_eq!(Operation::parse("update_board"), Operation::UpdateBoard);
        assert_eq!(Operation::parse("create_thread"), Operation::CreateThread);
        assert_eq!(Operation::parse("close_thread"), Operation::CloseThread);
        assert_eq!(Operation::parse("create_post"), Operation::CreatePost);
        assert_eq!(Operation::parse("delete_post"), Operation::DeletePost);
    }

    #[test]
    fn test_parse_unknown_kind() {
        assert_eq!(Operation::parse("pin_thread"), Operation::Unknown);
        assert_eq!(Operation::parse(""), Operation::Unknown);
    }

    #[test]
    fn test_entry_deserializes_with_minimal_body() {
        let json = r#"{"seq_num": 7, "operation": "delete_post", "entity_id": "p1"}"#;
        let entry: BoardLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.seq_num, 7);
        assert_eq!(entry.entity_id, "p1");
        assert!(entry.data.is_empty());
        assert!(entry.signature.is_empty());
    }
}
