//! Read-model query service for Agora.
//!
//! Translates paginated read requests into repository calls against the
//! materialized store. Strictly read-only: this surface can be hit by many
//! concurrent readers while the replayer is writing, and a reader never
//! observes a half-applied log entry.
//!
//! Single-entity misses are `Ok(None)`, not errors; storage failures
//! surface flatly as [`QueryError`] with no deeper taxonomy at this
//! boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use database::models::{Board, Pagination, Post, Thread};
use database::search::{self, PostFilter, SearchResults};
use database::{board, cursor, post, thread, Database};

/// Errors surfaced by the query boundary.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Storage failure, passed through verbatim.
    #[error(transparent)]
    Database(#[from] database::DatabaseError),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Post search request: a substring query plus optional scope filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPostsRequest {
    pub query: String,
    pub board_id: Option<String>,
    pub thread_id: Option<String>,
    pub author_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Thread search request: a substring query over titles, optionally scoped
/// to one board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchThreadsRequest {
    pub query: String,
    pub board_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregate index statistics, including replay progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub board_count: i64,
    pub thread_count: i64,
    pub post_count: i64,
    pub last_applied_seq: i64,
}

/// Read-only view over the materialized store.
#[derive(Clone)]
pub struct QueryService {
    db: Database,
}

impl QueryService {
    /// Create a query service over a connected store.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List all boards.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(board::list(self.db.pool()).await?)
    }

    /// Get a board, or `None` if it has not been indexed.
    pub async fn get_board(&self, id: &str) -> Result<Option<Board>> {
        Ok(board::get(self.db.pool(), id).await?)
    }

    /// List threads of a board with limit/offset defaults applied.
    pub async fn list_threads(
        &self,
        board_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Thread>> {
        let page = Pagination::new(limit, offset);
        Ok(thread::list_by_board(self.db.pool(), board_id, page).await?)
    }

    /// Get a thread, or `None` if it has not been indexed.
    pub async fn get_thread(&self, id: &str) -> Result<Option<Thread>> {
        Ok(thread::get(self.db.pool(), id).await?)
    }

    /// List posts of a thread with limit/offset defaults applied.
    ///
    /// Soft-deleted posts are included unless the caller filters them out.
    pub async fn list_posts(
        &self,
        thread_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
        include_deleted: bool,
    ) -> Result<Vec<Post>> {
        let page = Pagination::new(limit, offset);
        Ok(post::list_by_thread(self.db.pool(), thread_id, page, include_deleted).await?)
    }

    /// Get a post, or `None` if it has not been indexed.
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>> {
        Ok(post::get(self.db.pool(), id).await?)
    }

    /// Search post content; returns the page, the exact total, and the
    /// effective pagination.
    pub async fn search_posts(&self, req: &SearchPostsRequest) -> Result<SearchResults<Post>> {
        let page = Pagination::new(req.limit, req.offset);
        let filter = PostFilter {
            board_id: req.board_id.as_deref(),
            thread_id: req.thread_id.as_deref(),
            author_id: req.author_id.as_deref(),
        };
        Ok(search::posts(self.db.pool(), &req.query, filter, page).await?)
    }

    /// Search thread titles; returns the page, the exact total, and the
    /// effective pagination.
    pub async fn search_threads(
        &self,
        req: &SearchThreadsRequest,
    ) -> Result<SearchResults<Thread>> {
        let page = Pagination::new(req.limit, req.offset);
        Ok(search::threads(self.db.pool(), &req.query, req.board_id.as_deref(), page).await?)
    }

    /// Aggregate counts plus the replay cursor position.
    pub async fn stats(&self) -> Result<IndexStats> {
        Ok(IndexStats {
            board_count: board::count(self.db.pool()).await?,
            thread_count: thread::count(self.db.pool()).await?,
            post_count: post::count(self.db.pool()).await?,
            last_applied_seq: cursor::get(self.db.pool()).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_service() -> QueryService {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        QueryService::new(db)
    }

    async fn seed(service: &QueryService) {
        let mut conn = service.db.pool().acquire().await.unwrap();
        let b = Board {
            id: "b1".to_string(),
            name: "General".to_string(),
            description: String::new(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            thread_count: 0,
        };
        board::create(&mut conn, &b).await.unwrap();

        let t = Thread {
            id: "t1".to_string(),
            board_id: "b1".to_string(),
            title: "Hello".to_string(),
            author_id: "user1".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            post_count: 0,
            is_closed: false,
        };
        thread::create(&mut conn, &t).await.unwrap();

        let p = Post {
            id: "p1".to_string(),
            thread_id: "t1".to_string(),
            board_id: "b1".to_string(),
            author_id: "user1".to_string(),
            content: "hello world".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            is_deleted: false,
            reply_to: None,
        };
        post::create(&mut conn, &p).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_entity_is_none() {
        let service = test_service().await;

        assert!(service.get_board("nope").await.unwrap().is_none());
        assert!(service.get_thread("nope").await.unwrap().is_none());
        assert!(service.get_post("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookups_and_defaults() {
        let service = test_service().await;
        seed(&service).await;

        let board = service.get_board("b1").await.unwrap().unwrap();
        assert_eq!(board.name, "General");

        let threads = service.list_threads("b1", None, None).await.unwrap();
        assert_eq!(threads.len(), 1);

        let posts = service.list_posts("t1", None, None, true).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_search_echoes_effective_pagination() {
        let service = test_service().await;
        seed(&service).await;

        let req = SearchPostsRequest {
            query: "hello".to_string(),
            limit: Some(500),
            offset: Some(-3),
            ..Default::default()
        };
        let results = service.search_posts(&req).await.unwrap();
        assert_eq!(results.total_count, 1);
        assert_eq!(results.limit, Pagination::MAX_LIMIT);
        assert_eq!(results.offset, 0);
    }

    #[tokio::test]
    async fn test_stats_reports_cursor() {
        let service = test_service().await;
        seed(&service).await;

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.board_count, 1);
        assert_eq!(stats.thread_count, 1);
        assert_eq!(stats.post_count, 1);
        assert_eq!(stats.last_applied_seq, 0);
    }
}
