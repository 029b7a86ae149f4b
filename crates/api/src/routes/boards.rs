//! Board lookup routes.

use axum::extract::{Path, Query, State};
use axum::Json;

use database::models::{Board, Thread};

use crate::error::{ApiError, Result};
use crate::routes::PageParams;
use crate::state::AppState;

/// List all boards.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Board>>> {
    Ok(Json(state.query.list_boards().await?))
}

/// Get one board.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Board>> {
    let board = state.query.get_board(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(board))
}

/// List threads of a board, paginated.
pub async fn threads(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Thread>>> {
    let threads = state
        .query
        .list_threads(&id, page.limit, page.offset)
        .await?;
    Ok(Json(threads))
}
