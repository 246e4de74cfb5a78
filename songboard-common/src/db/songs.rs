//! Song database operations
//!
//! Every operation touches exactly one row, so no explicit transactions are
//! used. Create and update read the row back so callers always receive the
//! canonical stored values (id, created_at).

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::models::{Difficulty, NewSong, Song, SongUpdate, Status};
use crate::{Error, Result};

const SELECT_COLUMNS: &str = "SELECT id, title, youtube_url, difficulty, status, created_at FROM songs";

/// All songs, newest first
pub async fn list_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "{} ORDER BY created_at DESC, id DESC",
        SELECT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Load a song by id
pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// Column values for a new row
///
/// Difficulty and status are passed as stored text. The table's CHECK
/// constraints reject anything outside the allowed sets, which surfaces as
/// [`Error::Database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSongColumns<'a> {
    pub title: &'a str,
    pub youtube_url: Option<&'a str>,
    pub difficulty: &'a str,
    pub status: &'a str,
}

impl<'a> From<&'a NewSong> for NewSongColumns<'a> {
    fn from(song: &'a NewSong) -> Self {
        Self {
            title: &song.title,
            youtube_url: song.youtube_url.as_deref(),
            difficulty: song.difficulty.as_str(),
            status: song.status.as_str(),
        }
    }
}

/// Column changes for a partial update; `None` keeps the stored value
///
/// `youtube_url: Some(None)` clears the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SongChanges<'a> {
    pub title: Option<&'a str>,
    pub youtube_url: Option<Option<&'a str>>,
    pub difficulty: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl<'a> From<&'a SongUpdate> for SongChanges<'a> {
    fn from(update: &'a SongUpdate) -> Self {
        Self {
            title: update.title.as_deref(),
            youtube_url: update.youtube_url.as_ref().map(|url| url.as_deref()),
            difficulty: update.difficulty.map(|d| d.as_str()),
            status: update.status.map(|s| s.as_str()),
        }
    }
}

/// Insert a song and return the stored row
pub async fn insert_song(pool: &SqlitePool, song: &NewSong) -> Result<Song> {
    insert_song_columns(pool, song.into()).await
}

/// Insert raw column values and return the stored row
pub async fn insert_song_columns(pool: &SqlitePool, columns: NewSongColumns<'_>) -> Result<Song> {
    let id = sqlx::query(
        "INSERT INTO songs (title, youtube_url, difficulty, status) VALUES (?, ?, ?, ?)",
    )
    .bind(columns.title)
    .bind(columns.youtube_url)
    .bind(columns.difficulty)
    .bind(columns.status)
    .execute(pool)
    .await?
    .last_insert_rowid();

    debug!(id, title = %columns.title, "Inserted song");

    get_song(pool, id)
        .await?
        .ok_or_else(|| Error::CorruptRow {
            id,
            reason: "missing after insert".to_string(),
        })
}

/// Apply a partial update and return the updated row
///
/// Fields left as `None` keep their stored value. Returns
/// [`Error::SongNotFound`] when no song has the given id.
pub async fn update_song(pool: &SqlitePool, id: i64, update: &SongUpdate) -> Result<Song> {
    update_song_columns(pool, id, update.into()).await
}

/// Apply raw column changes and return the updated row
///
/// A missing id is reported as [`Error::SongNotFound`] even when the changes
/// would also violate a constraint, since no row is touched.
pub async fn update_song_columns(
    pool: &SqlitePool,
    id: i64,
    changes: SongChanges<'_>,
) -> Result<Song> {
    let (set_url, url) = match changes.youtube_url {
        Some(url) => (true, url),
        None => (false, None),
    };

    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = COALESCE(?, title),
            youtube_url = CASE WHEN ? THEN ? ELSE youtube_url END,
            difficulty = COALESCE(?, difficulty),
            status = COALESCE(?, status)
        WHERE id = ?
        "#,
    )
    .bind(changes.title)
    .bind(set_url)
    .bind(url)
    .bind(changes.difficulty)
    .bind(changes.status)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::SongNotFound(id));
    }

    debug!(id, ?changes, "Updated song");

    get_song(pool, id)
        .await?
        .ok_or_else(|| Error::SongNotFound(id))
}

/// Permanently delete a song
///
/// Returns [`Error::SongNotFound`] when no song has the given id.
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::SongNotFound(id));
    }

    debug!(id, "Deleted song");
    Ok(())
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let id: i64 = row.try_get("id")?;
    let difficulty: String = row.try_get("difficulty")?;
    let status: String = row.try_get("status")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Song {
        id,
        title: row.try_get("title")?,
        youtube_url: row.try_get("youtube_url")?,
        difficulty: difficulty
            .parse::<Difficulty>()
            .map_err(|e: Error| Error::CorruptRow { id, reason: e.to_string() })?,
        status: status
            .parse::<Status>()
            .map_err(|e: Error| Error::CorruptRow { id, reason: e.to_string() })?,
        created_at,
    })
}
