//! Thread lookup routes.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use database::models::{Post, Thread};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Query parameters for listing a thread's posts.
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Soft-deleted posts are part of the record; pass `false` to hide them.
    pub include_deleted: Option<bool>,
}

/// Get one thread.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Thread>> {
    let thread = state.query.get_thread(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(thread))
}

/// List posts of a thread, paginated.
pub async fn posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PostListParams>,
) -> Result<Json<Vec<Post>>> {
    let posts = state
        .query
        .list_posts(
            &id,
            params.limit,
            params.offset,
            params.include_deleted.unwrap_or(true),
        )
        .await?;
    Ok(Json(posts))
}
