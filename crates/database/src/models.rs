//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A forum board materialized from the operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Board {
    /// Log-producer-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Maintained count of threads created under this board.
    pub thread_count: i64,
}

/// A discussion thread within a board.
///
/// `board_id` is a logical reference; the parent board may not have been
/// replayed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Thread {
    /// Log-producer-assigned identifier.
    pub id: String,
    /// Parent board id (logical, unenforced).
    pub board_id: String,
    /// Thread title.
    pub title: String,
    /// Author of the opening post.
    pub author_id: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Maintained count of posts created under this thread.
    pub post_count: i64,
    /// Whether the thread is closed to new posts.
    pub is_closed: bool,
}

/// A post within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Log-producer-assigned identifier.
    pub id: String,
    /// Parent thread id (logical, unenforced).
    pub thread_id: String,
    /// Board id, denormalized from the thread for filtering.
    pub board_id: String,
    /// Post author.
    pub author_id: String,
    /// Post body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Soft-delete tombstone; the row and content are retained.
    pub is_deleted: bool,
    /// Non-owning back-reference to another post. May dangle.
    pub reply_to: Option<String>,
}

/// Limit/offset pagination with defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page size, clamped to `1..=MAX_LIMIT`.
    pub limit: i64,
    /// Row offset, clamped to be non-negative.
    pub offset: i64,
}

impl Pagination {
    /// Page size applied when the caller does not supply one.
    pub const DEFAULT_LIMIT: i64 = 20;

    /// Upper bound on a single page.
    pub const MAX_LIMIT: i64 = 100;

    /// Build a pagination window, applying defaults and clamping to bounds.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let page = Pagination::new(None, None);
        assert_eq!(page.limit, Pagination::DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_pagination_clamps() {
        let page = Pagination::new(Some(0), Some(-5));
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);

        let page = Pagination::new(Some(10_000), Some(40));
        assert_eq!(page.limit, Pagination::MAX_LIMIT);
        assert_eq!(page.offset, 40);
    }
}
