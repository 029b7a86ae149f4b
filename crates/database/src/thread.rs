//! Thread repository operations.

use sqlx::{SqliteConnection, SqliteExecutor};

use crate::error::{DatabaseError, Result};
use crate::models::{Pagination, Thread};

/// Insert a new thread and bump the parent board's `thread_count`.
///
/// A missing parent board is tolerated: the counter update simply affects no
/// rows. Referential completeness is not guaranteed by the log.
pub async fn create(conn: &mut SqliteConnection, thread: &Thread) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO threads (id, board_id, title, author_id, created_at, updated_at, post_count, is_closed)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&thread.id)
    .bind(&thread.board_id)
    .bind(&thread.title)
    .bind(&thread.author_id)
    .bind(&thread.created_at)
    .bind(&thread.updated_at)
    .bind(thread.post_count)
    .bind(thread.is_closed)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Thread",
                    id: thread.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    sqlx::query(
        r#"
        UPDATE boards
        SET thread_count = thread_count + 1
        WHERE id = ?
        "#,
    )
    .bind(&thread.board_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Get a thread by id, or `None` if it has not been replayed.
pub async fn get(executor: impl SqliteExecutor<'_>, id: &str) -> Result<Option<Thread>> {
    let thread = sqlx::query_as::<_, Thread>(
        r#"
        SELECT id, board_id, title, author_id, created_at, updated_at, post_count, is_closed
        FROM threads
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(thread)
}

/// Close a thread to new posts and bump its `updated_at`.
pub async fn close(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE threads
        SET is_closed = 1, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Thread",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List threads of a board in insertion order, with limit/offset.
pub async fn list_by_board(
    executor: impl SqliteExecutor<'_>,
    board_id: &str,
    page: Pagination,
) -> Result<Vec<Thread>> {
    let threads = sqlx::query_as::<_, Thread>(
        r#"
        SELECT id, board_id, title, author_id, created_at, updated_at, post_count, is_closed
        FROM threads
        WHERE board_id = ?
        ORDER BY rowid
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(board_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await?;

    Ok(threads)
}

/// Count all threads.
pub async fn count(executor: impl SqliteExecutor<'_>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM threads
        "#,
    )
    .fetch_one(executor)
    .await?;

    Ok(count)
}
