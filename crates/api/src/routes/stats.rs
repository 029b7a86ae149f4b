//! Index statistics route.

use axum::extract::State;
use axum::Json;

use query::IndexStats;

use crate::error::Result;
use crate::state::AppState;

/// Aggregate entity counts plus the replay cursor position.
pub async fn stats(State(state): State<AppState>) -> Result<Json<IndexStats>> {
    Ok(Json(state.query.stats().await?))
}
