//! Substring search over post content and thread titles.
//!
//! Matching is case-insensitive substring (`LIKE` with an escaped pattern;
//! SQLite's default LIKE is case-insensitive for ASCII). Each search runs a
//! count query alongside the page query so `total_count` is exact and
//! deterministic regardless of the pagination window.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Pagination, Post, Thread};

/// One page of search matches plus the exact total and the effective
/// (defaulted, clamped) pagination that produced it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Optional filters for post search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFilter<'a> {
    pub board_id: Option<&'a str>,
    pub thread_id: Option<&'a str>,
    pub author_id: Option<&'a str>,
}

/// Search post content for a case-insensitive substring.
pub async fn posts(
    pool: &SqlitePool,
    query: &str,
    filter: PostFilter<'_>,
    page: Pagination,
) -> Result<SearchResults<Post>> {
    let pattern = like_pattern(query);

    let total_count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM posts
        WHERE content LIKE ? ESCAPE '\'
          AND (? IS NULL OR board_id = ?)
          AND (? IS NULL OR thread_id = ?)
          AND (? IS NULL OR author_id = ?)
        "#,
    )
    .bind(&pattern)
    .bind(filter.board_id)
    .bind(filter.board_id)
    .bind(filter.thread_id)
    .bind(filter.thread_id)
    .bind(filter.author_id)
    .bind(filter.author_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, thread_id, board_id, author_id, content, created_at, updated_at, is_deleted, reply_to
        FROM posts
        WHERE content LIKE ? ESCAPE '\'
          AND (? IS NULL OR board_id = ?)
          AND (? IS NULL OR thread_id = ?)
          AND (? IS NULL OR author_id = ?)
        ORDER BY created_at DESC, id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(filter.board_id)
    .bind(filter.board_id)
    .bind(filter.thread_id)
    .bind(filter.thread_id)
    .bind(filter.author_id)
    .bind(filter.author_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(SearchResults {
        items,
        total_count,
        limit: page.limit,
        offset: page.offset,
    })
}

/// Search thread titles for a case-insensitive substring.
pub async fn threads(
    pool: &SqlitePool,
    query: &str,
    board_id: Option<&str>,
    page: Pagination,
) -> Result<SearchResults<Thread>> {
    let pattern = like_pattern(query);

    let total_count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM threads
        WHERE title LIKE ? ESCAPE '\'
          AND (? IS NULL OR board_id = ?)
        "#,
    )
    .bind(&pattern)
    .bind(board_id)
    .bind(board_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, Thread>(
        r#"
        SELECT id, board_id, title, author_id, created_at, updated_at, post_count, is_closed
        FROM threads
        WHERE title LIKE ? ESCAPE '\'
          AND (? IS NULL OR board_id = ?)
        ORDER BY created_at DESC, id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(board_id)
    .bind(board_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(SearchResults {
        items,
        total_count,
        limit: page.limit,
        offset: page.offset,
    })
}

/// Wrap a user query in `%...%`, escaping LIKE metacharacters so the query
/// is matched literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Post, Thread};
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn post(id: &str, thread_id: &str, author_id: &str, content: &str) -> Post {
        Post {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            board_id: "b1".to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            is_deleted: false,
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn test_search_posts_substring() {
        let db = test_db().await;
        let mut conn = db.pool().acquire().await.unwrap();

        crate::post::create(&mut conn, &post("p1", "t1", "user1", "hello world"))
            .await
            .unwrap();
        crate::post::create(&mut conn, &post("p2", "t1", "user2", "another message"))
            .await
            .unwrap();
        drop(conn);

        let results = posts(db.pool(), "hello", PostFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(results.total_count, 1);
        assert_eq!(results.items.len(), 1);
        assert_eq!(results.items[0].id, "p1");
        assert_eq!(results.limit, Pagination::DEFAULT_LIMIT);
        assert_eq!(results.offset, 0);
    }

    #[tokio::test]
    async fn test_search_posts_author_filter() {
        let db = test_db().await;
        let mut conn = db.pool().acquire().await.unwrap();

        crate::post::create(&mut conn, &post("p1", "t1", "user1", "hello world"))
            .await
            .unwrap();
        crate::post::create(&mut conn, &post("p2", "t1", "user2", "hello again"))
            .await
            .unwrap();
        drop(conn);

        let filter = PostFilter {
            author_id: Some("user2"),
            ..Default::default()
        };
        let results = posts(db.pool(), "hello", filter, Pagination::default())
            .await
            .unwrap();
        assert_eq!(results.total_count, 1);
        assert_eq!(results.items[0].id, "p2");
    }

    #[tokio::test]
    async fn test_search_threads_case_insensitive() {
        let db = test_db().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let thread = Thread {
            id: "t1".to_string(),
            board_id: "b1".to_string(),
            title: "Hello".to_string(),
            author_id: "user1".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            post_count: 0,
            is_closed: false,
        };
        crate::thread::create(&mut conn, &thread).await.unwrap();
        drop(conn);

        let results = threads(db.pool(), "hello", None, Pagination::default())
            .await
            .unwrap();
        assert_eq!(results.total_count, 1);
        assert_eq!(results.items[0].id, "t1");

        let results = threads(db.pool(), "HELLO", None, Pagination::default())
            .await
            .unwrap();
        assert_eq!(results.total_count, 1);
    }

    #[tokio::test]
    async fn test_like_metacharacters_are_literal() {
        let db = test_db().await;
        let mut conn = db.pool().acquire().await.unwrap();

        crate::post::create(&mut conn, &post("p1", "t1", "user1", "discount is 100%"))
            .await
            .unwrap();
        crate::post::create(&mut conn, &post("p2", "t1", "user1", "no percent here"))
            .await
            .unwrap();
        drop(conn);

        let results = posts(db.pool(), "100%", PostFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(results.total_count, 1);
        assert_eq!(results.items[0].id, "p1");
    }

    #[test]
    fn test_like_pattern_escaping() {
        assert_eq!(like_pattern("hello"), "%hello%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
