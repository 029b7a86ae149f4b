//! SQLite persistence layer for Agora.
//!
//! This crate is the durable store behind the log-replay index: boards,
//! threads, and posts materialized from the operation log, a persisted replay
//! cursor, and substring search over post content and thread titles.
//!
//! Entity write functions take `&mut SqliteConnection` so the replayer can
//! compose entity mutation and cursor advance inside a single transaction.
//! Read functions are generic over [`sqlx::SqliteExecutor`] and serve both
//! pooled reads and in-transaction reads.
//!
//! # Example
//!
//! ```no_run
//! use database::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:agora.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let boards = database::board::list(db.pool()).await?;
//!     println!("{} boards indexed", boards.len());
//!
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod cursor;
pub mod error;
pub mod models;
pub mod post;
pub mod search;
pub mod thread;

pub use error::{DatabaseError, Result};
pub use models::{Board, Pagination, Post, Thread};
pub use search::{PostFilter, SearchResults};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    ///
    /// Sized for many concurrent readers alongside the single replay writer.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/agora.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            // WAL lets readers proceed while a replay transaction is open
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Clear all entity tables and zero the replay cursor.
    ///
    /// The store is a disposable derived view; this is the first half of the
    /// rebuild path (the second half is replaying the log from the start).
    pub async fn reset(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM posts").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM threads").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM boards").execute(&mut *tx).await?;
        cursor::set(&mut tx, 0).await?;

        tx.commit().await?;

        tracing::info!("Cleared entity tables and reset the replay cursor");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
