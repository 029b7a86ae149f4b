//! Search routes.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use database::models::{Post, Thread};
use database::search::SearchResults;
use query::{SearchPostsRequest, SearchThreadsRequest};

use crate::error::Result;
use crate::state::AppState;

/// Query parameters for post search.
#[derive(Debug, Deserialize)]
pub struct SearchPostsParams {
    /// Case-insensitive substring to match against post content.
    pub q: String,
    pub board_id: Option<String>,
    pub thread_id: Option<String>,
    pub author_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for thread search.
#[derive(Debug, Deserialize)]
pub struct SearchThreadsParams {
    /// Case-insensitive substring to match against thread titles.
    pub q: String,
    pub board_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Search post content.
pub async fn posts(
    State(state): State<AppState>,
    Query(params): Query<SearchPostsParams>,
) -> Result<Json<SearchResults<Post>>> {
    let req = SearchPostsRequest {
        query: params.q,
        board_id: params.board_id,
        thread_id: params.thread_id,
        author_id: params.author_id,
        limit: params.limit,
        offset: params.offset,
    };
    Ok(Json(state.query.search_posts(&req).await?))
}

/// Search thread titles.
pub async fn threads(
    State(state): State<AppState>,
    Query(params): Query<SearchThreadsParams>,
) -> Result<Json<SearchResults<Thread>>> {
    let req = SearchThreadsRequest {
        query: params.q,
        board_id: params.board_id,
        limit: params.limit,
        offset: params.offset,
    };
    Ok(Json(state.query.search_threads(&req).await?))
}
