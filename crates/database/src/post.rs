//! Post repository operations.

use sqlx::{SqliteConnection, SqliteExecutor};

use crate::error::{DatabaseError, Result};
use crate::models::{Pagination, Post};

/// Insert a new post and bump the parent thread's `post_count`.
///
/// A missing parent thread is tolerated: the post row is inserted as-is and
/// the counter update affects no rows.
pub async fn create(conn: &mut SqliteConnection, post: &Post) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO posts (id, thread_id, board_id, author_id, content, created_at, updated_at, is_deleted, reply_to)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&post.id)
    .bind(&post.thread_id)
    .bind(&post.board_id)
    .bind(&post.author_id)
    .bind(&post.content)
    .bind(&post.created_at)
    .bind(&post.updated_at)
    .bind(post.is_deleted)
    .bind(&post.reply_to)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Post",
                    id: post.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    sqlx::query(
        r#"
        UPDATE threads
        SET post_count = post_count + 1
        WHERE id = ?
        "#,
    )
    .bind(&post.thread_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Get a post by id, or `None` if it has not been replayed.
///
/// Soft-deleted posts are still returned; the tombstone flag is data.
pub async fn get(executor: impl SqliteExecutor<'_>, id: &str) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, thread_id, board_id, author_id, content, created_at, updated_at, is_deleted, reply_to
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Mark a post deleted. The row and its content are retained.
pub async fn mark_deleted(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET is_deleted = 1
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Post",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List posts of a thread in insertion order, with limit/offset.
///
/// Soft-deleted posts are included unless `include_deleted` is false.
pub async fn list_by_thread(
    executor: impl SqliteExecutor<'_>,
    thread_id: &str,
    page: Pagination,
    include_deleted: bool,
) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, thread_id, board_id, author_id, content, created_at, updated_at, is_deleted, reply_to
        FROM posts
        WHERE thread_id = ?
          AND (? OR is_deleted = 0)
        ORDER BY rowid
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(thread_id)
    .bind(include_deleted)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await?;

    Ok(posts)
}

/// Count all posts, tombstones included.
pub async fn count(executor: impl SqliteExecutor<'_>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM posts
        "#,
    )
    .fetch_one(executor)
    .await?;

    Ok(count)
}
