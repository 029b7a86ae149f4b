//! Read-only HTTP API over the Agora index.
//!
//! Serves board/thread/post lookups and search against the materialized
//! store. Strictly a reader: replay happens in a separate process and this
//! surface never writes.

mod config;
mod error;
mod routes;
mod state;

use database::Database;
use query::QueryService;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    // Connect to the materialized store
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let state = AppState::new(QueryService::new(db));

    let app = routes::router().with_state(state);

    info!(addr = %config.addr, "Agora API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
