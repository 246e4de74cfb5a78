//! Database initialization
//!
//! Opens (creating if needed) the SQLite file and ensures the `songs` table
//! exists. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets list requests read while a mutation commits
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_songs_table(&pool).await?;

    Ok(pool)
}

/// In-memory database with the full schema
///
/// Uses a single long-lived connection: every SQLite `:memory:` connection is
/// its own database, so a larger pool would see empty tables.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;

    create_songs_table(&pool).await?;

    Ok(pool)
}

/// Create the songs table
///
/// `difficulty` and `status` are restricted to their closed sets by CHECK
/// constraints. `created_at` keeps millisecond precision so rows created in
/// the same second still sort by creation.
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            youtube_url TEXT,
            difficulty TEXT NOT NULL
                CHECK(difficulty IN ('Beginner', 'Intermediate', 'Advanced')),
            status TEXT NOT NULL
                CHECK(status IN ('Want to Learn', 'Currently Learning', 'Learned', 'Mastered')),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_created_at ON songs(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}
