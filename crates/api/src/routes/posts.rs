//! Post lookup routes.

use axum::extract::{Path, State};
use axum::Json;

use database::models::Post;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Get one post. Soft-deleted posts are returned with their tombstone flag.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Post>> {
    let post = state.query.get_post(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(post))
}
