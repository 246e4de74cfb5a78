//! Song CRUD endpoints
//!
//! - GET    /api/songs      all songs, newest first
//! - POST   /api/songs      create (title, difficulty, status required)
//! - PUT    /api/songs/:id  partial update
//! - DELETE /api/songs/:id  hard delete
//!
//! Difficulty and status are forwarded as text; the table's CHECK
//! constraints decide whether they are allowed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use songboard_common::db::{self, NewSongColumns, SongChanges};
use songboard_common::models::deserialize_present;
use songboard_common::Song;
use tracing::info;

use super::extract::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const REQUIRED_FIELDS_MESSAGE: &str = "Title, difficulty, and status are required";

/// POST /api/songs request body
///
/// Fields are taken as raw strings so a missing field is reported as a
/// validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub title: Option<String>,
    pub youtube_url: Option<String>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
}

impl CreateSongRequest {
    fn columns(&self) -> ApiResult<NewSongColumns<'_>> {
        let (Some(title), Some(difficulty), Some(status)) = (
            non_empty(&self.title),
            non_empty(&self.difficulty),
            non_empty(&self.status),
        ) else {
            return Err(ApiError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        Ok(NewSongColumns {
            title,
            youtube_url: non_empty(&self.youtube_url),
            difficulty,
            status,
        })
    }
}

/// PUT /api/songs/:id request body
///
/// An absent key keeps the stored value. `youtube_url: null` clears the link;
/// `null` for the other fields is treated like an absent key.
#[derive(Debug, Deserialize)]
pub struct UpdateSongRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub youtube_url: Option<Option<String>>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
}

impl UpdateSongRequest {
    fn changes(&self) -> ApiResult<SongChanges<'_>> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
            }
        }

        Ok(SongChanges {
            title: self.title.as_deref(),
            // An empty string clears the link, same as on create
            youtube_url: self.youtube_url.as_ref().map(non_empty),
            difficulty: self.difficulty.as_deref(),
            status: self.status.as_deref(),
        })
    }
}

/// DELETE confirmation body
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// GET /api/songs
pub async fn list_songs(State(state): State<AppState>) -> ApiResult<Json<Vec<Song>>> {
    let songs = db::list_songs(&state.db).await?;
    Ok(Json(songs))
}

/// POST /api/songs
pub async fn create_song(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSongRequest>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let song = db::insert_song_columns(&state.db, request.columns()?).await?;

    info!(id = song.id, status = %song.status, "Created song '{}'", song.title);
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/songs/:id
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(request): ApiJson<UpdateSongRequest>,
) -> ApiResult<Json<Song>> {
    let song = db::update_song_columns(&state.db, id, request.changes()?).await?;

    info!(id, status = %song.status, "Updated song");
    Ok(Json(song))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    db::delete_song(&state.db, id).await?;

    info!(id, "Deleted song");
    Ok(Json(DeleteResponse {
        message: "Song deleted successfully".to_string(),
    }))
}
