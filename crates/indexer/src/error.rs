//! Replay error types.

use thiserror::Error;

/// Errors that can fail a single log entry during replay.
///
/// Any of these aborts the entry's transaction without advancing the cursor;
/// the replay driver owns retry policy. Unknown operation kinds are
/// deliberately not represented here — they are tolerated, not failed.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The entry's JSON payload could not be decoded for its operation kind.
    #[error("malformed payload at seq {seq}: {source}")]
    MalformedPayload {
        seq: i64,
        #[source]
        source: serde_json::Error,
    },

    /// An entity-id-only operation arrived with an empty `entity_id`.
    #[error("{operation} at seq {seq} requires an entity id")]
    MissingEntityId { seq: i64, operation: &'static str },

    /// Repository-level failure (conflict, missing target, storage).
    #[error(transparent)]
    Database(#[from] database::DatabaseError),

    /// Transaction-level storage failure (begin/commit).
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
