//! Route handlers for the read API.

pub mod boards;
pub mod health;
pub mod posts;
pub mod search;
pub mod stats;
pub mod threads;

use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::state::AppState;

/// Limit/offset query parameters shared by listing routes.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Index statistics
        .route("/api/stats", get(stats::stats))
        // Entity lookups
        .route("/api/boards", get(boards::list))
        .route("/api/boards/:id", get(boards::get))
        .route("/api/boards/:id/threads", get(boards::threads))
        .route("/api/threads/:id", get(threads::get))
        .route("/api/threads/:id/posts", get(threads::posts))
        .route("/api/posts/:id", get(posts::get))
        // Search
        .route("/api/search/posts", get(search::posts))
        .route("/api/search/threads", get(search::threads))
}
