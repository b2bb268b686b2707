//! Database access for catsync-engine
//!
//! SQLite holds the local track collection that search results sync into.

pub mod entries;

pub use entries::EntryStore;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

use crate::error::Result;

/// Initialize database connection pool
///
/// Creates the file (and its parent folder) when missing, then the schema.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(catsync_common::Error::from)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    init_tables(&pool).await?;

    Ok(pool)
}

/// In-memory pool pinned to one connection so every query sees the same
/// database
///
/// The connection is never reaped: closing it would drop the database
/// along with every retained entry.
pub async fn init_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the entries table if it does not exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            uri TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist_display TEXT NOT NULL,
            duration_secs INTEGER NOT NULL,
            playback_uri TEXT NOT NULL,
            cover_url TEXT,
            external_url TEXT,
            last_seen_generation INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_entries_generation ON entries (last_seen_generation)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (entries)");

    Ok(())
}
