//! Log replay indexer for Agora.
//!
//! This crate materializes the append-only board operation log into the
//! relational store. Entries arrive from an out-of-scope transport (the
//! content-addressable network) already signature-checked; the replayer's
//! job is to apply each one exactly once, survive duplicate and out-of-order
//! delivery, and resume after a crash from the persisted cursor.
//!
//! Each entry is applied inside a single transaction that covers the
//! idempotency check, the entity mutation, and the cursor advance, so the
//! materialized view and the replay progress can never diverge.
//!
//! # Example
//!
//! ```no_run
//! use database::Database;
//! use indexer::{BoardLogEntry, Replayer};
//!
//! # async fn example(entry: BoardLogEntry) -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:agora.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let replayer = Replayer::new(db);
//! replayer.apply(&entry).await?;
//! # Ok(())
//! # }
//! ```

mod entry;
mod error;
mod payload;
mod replayer;

pub use entry::{BoardLogEntry, Operation};
pub use error::ReplayError;
pub use payload::{BoardPayload, PostPayload, ThreadPayload};
pub use replayer::{ApplyOutcome, ReplayStats, Replayer};
