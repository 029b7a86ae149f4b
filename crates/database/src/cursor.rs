//! Replay cursor persistence.
//!
//! The cursor is the sequence number of the most recently applied log entry,
//! stored in its own single-row table so it can be read and advanced inside
//! the same transaction as entity mutation. It is never cached in memory;
//! crash recovery resumes exactly where replay stopped.

use sqlx::{SqliteConnection, SqliteExecutor};

use crate::error::Result;

/// Read the last applied log sequence number. A fresh store reports 0.
pub async fn get(executor: impl SqliteExecutor<'_>) -> Result<i64> {
    let seq = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT last_applied_seq FROM replay_cursor WHERE id = 0
        "#,
    )
    .fetch_optional(executor)
    .await?;

    Ok(seq.unwrap_or(0))
}

/// Persist the last applied log sequence number.
pub async fn set(conn: &mut SqliteConnection, seq: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO replay_cursor (id, last_applied_seq)
        VALUES (0, ?)
        ON CONFLICT(id) DO UPDATE SET
            last_applied_seq = excluded.last_applied_seq
        "#,
    )
    .bind(seq)
    .execute(conn)
    .await?;

    Ok(())
}
