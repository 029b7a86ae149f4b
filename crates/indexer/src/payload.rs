//! Per-operation JSON payload shapes.
//!
//! Payloads are polymorphic per operation kind, so each gets its own typed
//! decode rather than one generic schema. Every field defaults: a missing or
//! empty field falls back to the entry envelope (`entity_id`, `timestamp`)
//! in the replayer, and decode failure is scoped to the single entry being
//! processed.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::entry::BoardLogEntry;
use crate::error::ReplayError;

/// Payload for `create_board` and `update_board`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for `create_thread`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for `create_post`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Decode an entry's payload, treating an empty body as all-defaults.
pub(crate) fn decode<T>(entry: &BoardLogEntry) -> Result<T, ReplayError>
where
    T: DeserializeOwned + Default,
{
    if entry.data.is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&entry.data).map_err(|source| ReplayError::MalformedPayload {
        seq: entry.seq_num,
        source,
    })
}
