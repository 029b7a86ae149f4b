//! Transactional replay of board log entries.

use database::models::{Board, Post, Thread};
use database::{cursor, Database};
use sqlx::SqliteConnection;
use tracing::{debug, warn};

use crate::entry::{BoardLogEntry, Operation};
use crate::error::ReplayError;
use crate::payload::{self, BoardPayload, PostPayload, ThreadPayload};

/// Result of applying a single log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The entry mutated the store and the cursor advanced to its `seq_num`.
    Applied,
    /// The entry's `seq_num` was at or below the cursor; nothing changed.
    Skipped,
    /// The operation kind was unrecognized; the cursor still advanced.
    UnknownOperation,
}

/// Counters for a batch replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub applied: u64,
    pub skipped: u64,
    pub unknown: u64,
}

/// Applies board log entries to the materialized store.
///
/// The replayer is the store's only writer. Each entry runs inside one
/// transaction: the idempotency cursor check, the entity mutation, and the
/// cursor advance commit or roll back together, so concurrent readers never
/// observe a half-applied entry. A handler error (or cancellation mid-apply)
/// drops the transaction before commit, leaving the cursor at its pre-attempt
/// value; the caller owns retry policy, this type never retries.
pub struct Replayer {
    db: Database,
}

impl Replayer {
    /// Create a replayer over a connected store.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying store.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Apply one log entry.
    ///
    /// Entries at or below the persisted cursor are skipped without touching
    /// entity state, which makes apply idempotent under duplicate and
    /// out-of-order re-delivery.
    pub async fn apply(&self, entry: &BoardLogEntry) -> Result<ApplyOutcome, ReplayError> {
        let mut tx = self.db.pool().begin().await?;

        let cursor = cursor::get(&mut *tx).await?;
        if entry.seq_num <= cursor {
            debug!(
                seq = entry.seq_num,
                cursor, "Entry at or below cursor, skipping"
            );
            tx.commit().await?;
            return Ok(ApplyOutcome::Skipped);
        }

        let outcome = match Operation::parse(&entry.operation) {
            Operation::CreateBoard => {
                create_board(&mut tx, entry).await?;
                ApplyOutcome::Applied
            }
            Operation::UpdateBoard => {
                update_board(&mut tx, entry).await?;
                ApplyOutcome::Applied
            }
            Operation::CreateThread => {
                create_thread(&mut tx, entry).await?;
                ApplyOutcome::Applied
            }
            Operation::CloseThread => {
                close_thread(&mut tx, entry).await?;
                ApplyOutcome::Applied
            }
            Operation::CreatePost => {
                create_post(&mut tx, entry).await?;
                ApplyOutcome::Applied
            }
            Operation::DeletePost => {
                delete_post(&mut tx, entry).await?;
                ApplyOutcome::Applied
            }
            Operation::Unknown => {
                // Forward compatibility: newer producers may emit kinds this
                // indexer does not know. Tolerate and move past them.
                warn!(
                    seq = entry.seq_num,
                    operation = %entry.operation,
                    "Unknown operation kind, advancing cursor"
                );
                ApplyOutcome::UnknownOperation
            }
        };

        cursor::set(&mut tx, entry.seq_num).await?;
        tx.commit().await?;

        debug!(seq = entry.seq_num, operation = %entry.operation, "Applied log entry");
        Ok(outcome)
    }

    /// Apply a batch of entries in order, stopping at the first error.
    ///
    /// Each entry still commits (or rolls back) individually, so a failed
    /// batch can be resumed from where it stopped.
    pub async fn apply_batch(&self, entries: &[BoardLogEntry]) -> Result<ReplayStats, ReplayError> {
        let mut stats = ReplayStats::default();
        for entry in entries {
            match self.apply(entry).await? {
                ApplyOutcome::Applied => stats.applied += 1,
                ApplyOutcome::Skipped => stats.skipped += 1,
                ApplyOutcome::UnknownOperation => stats.unknown += 1,
            }
        }
        Ok(stats)
    }
}

/// Envelope fields back-fill empty payload fields.
fn fallback(value: String, envelope: &str) -> String {
    if value.is_empty() {
        envelope.to_string()
    } else {
        value
    }
}

async fn create_board(conn: &mut SqliteConnection, entry: &BoardLogEntry) -> Result<(), ReplayError> {
    let payload: BoardPayload = payload::decode(entry)?;
    let board = Board {
        id: fallback(payload.id, &entry.entity_id),
        name: payload.name,
        description: payload.description,
        created_at: fallback(payload.created_at, &entry.timestamp),
        updated_at: fallback(payload.updated_at, &entry.timestamp),
        thread_count: 0,
    };
    database::board::create(conn, &board).await?;
    Ok(())
}

async fn update_board(conn: &mut SqliteConnection, entry: &BoardLogEntry) -> Result<(), ReplayError> {
    let payload: BoardPayload = payload::decode(entry)?;
    let id = fallback(payload.id, &entry.entity_id);

    if database::board::get(&mut *conn, &id).await?.is_some() {
        database::board::merge_update(conn, &id, &payload.name, &payload.description).await?;
    } else {
        // Update-before-create ordering (a node joining replay mid-stream):
        // materialize the board from what arrived, timestamped from the
        // entry envelope.
        let board = Board {
            id,
            name: payload.name,
            description: payload.description,
            created_at: entry.timestamp.clone(),
            updated_at: entry.timestamp.clone(),
            thread_count: 0,
        };
        database::board::create(conn, &board).await?;
    }
    Ok(())
}

async fn create_thread(conn: &mut SqliteConnection, entry: &BoardLogEntry) -> Result<(), ReplayError> {
    let payload: ThreadPayload = payload::decode(entry)?;
    let thread = Thread {
        id: fallback(payload.id, &entry.entity_id),
        board_id: payload.board_id,
        title: payload.title,
        author_id: payload.author_id,
        created_at: fallback(payload.created_at, &entry.timestamp),
        updated_at: fallback(payload.updated_at, &entry.timestamp),
        post_count: 0,
        is_closed: false,
    };
    database::thread::create(conn, &thread).await?;
    Ok(())
}

async fn close_thread(conn: &mut SqliteConnection, entry: &BoardLogEntry) -> Result<(), ReplayError> {
    if entry.entity_id.is_empty() {
        return Err(ReplayError::MissingEntityId {
            seq: entry.seq_num,
            operation: Operation::CloseThread.as_str(),
        });
    }
    database::thread::close(conn, &entry.entity_id).await?;
    Ok(())
}

async fn create_post(conn: &mut SqliteConnection, entry: &BoardLogEntry) -> Result<(), ReplayError> {
    let payload: PostPayload = payload::decode(entry)?;
    let post = Post {
        id: fallback(payload.id, &entry.entity_id),
        thread_id: payload.thread_id,
        board_id: payload.board_id,
        author_id: payload.author_id,
        content: payload.content,
        created_at: fallback(payload.created_at, &entry.timestamp),
        updated_at: fallback(payload.updated_at, &entry.timestamp),
        is_deleted: false,
        reply_to: payload.reply_to,
    };
    database::post::create(conn, &post).await?;
    Ok(())
}

async fn delete_post(conn: &mut SqliteConnection, entry: &BoardLogEntry) -> Result<(), ReplayError> {
    if entry.entity_id.is_empty() {
        return Err(ReplayError::MissingEntityId {
            seq: entry.seq_num,
            operation: Operation::DeletePost.as_str(),
        });
    }
    database::post::mark_deleted(conn, &entry.entity_id).await?;
    Ok(())
}
