//! Board repository operations.

use sqlx::{SqliteConnection, SqliteExecutor};

use crate::error::{DatabaseError, Result};
use crate::models::Board;

/// Insert a new board.
///
/// Strict: an existing id is an [`DatabaseError::AlreadyExists`] error.
/// Idempotency under log re-delivery is the replayer's responsibility, not
/// this layer's.
pub async fn create(conn: &mut SqliteConnection, board: &Board) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO boards (id, name, description, created_at, updated_at, thread_count)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&board.id)
    .bind(&board.name)
    .bind(&board.description)
    .bind(&board.created_at)
    .bind(&board.updated_at)
    .bind(board.thread_count)
    .execute(conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Board",
                    id: board.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a board by id, or `None` if it has not been replayed.
pub async fn get(executor: impl SqliteExecutor<'_>, id: &str) -> Result<Option<Board>> {
    let board = sqlx::query_as::<_, Board>(
        r#"
        SELECT id, name, description, created_at, updated_at, thread_count
        FROM boards
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(board)
}

/// Merge incoming fields onto an existing board.
///
/// Only non-empty `name`/`description` overwrite the stored values;
/// `thread_count` is untouched and `updated_at` is bumped.
pub async fn merge_update(
    conn: &mut SqliteConnection,
    id: &str,
    name: &str,
    description: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE boards
        SET name = CASE WHEN ? = '' THEN name ELSE ? END,
            description = CASE WHEN ? = '' THEN description ELSE ? END,
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(name)
    .bind(description)
    .bind(description)
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Board",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List all boards in insertion order.
pub async fn list(executor: impl SqliteExecutor<'_>) -> Result<Vec<Board>> {
    let boards = sqlx::query_as::<_, Board>(
        r#"
        SELECT id, name, description, created_at, updated_at, thread_count
        FROM boards
        ORDER BY rowid
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(boards)
}

/// Count all boards.
pub async fn count(executor: impl SqliteExecutor<'_>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM boards
        "#,
    )
    .fetch_one(executor)
    .await?;

    Ok(count)
}
