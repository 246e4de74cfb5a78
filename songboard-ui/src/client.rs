//! HTTP client for the songboard REST API

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use songboard_common::{NewSong, Song, SongUpdate};
use thiserror::Error;
use tracing::debug;

/// Base URL of the API service
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Client-side failures; none are retried
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never completed (connection refused, reset, ...)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

/// Song operations the board needs
#[async_trait]
pub trait SongApi {
    async fn list_songs(&self) -> Result<Vec<Song>, ClientError>;
    async fn create_song(&self, song: &NewSong) -> Result<Song, ClientError>;
    async fn update_song(&self, id: i64, update: &SongUpdate) -> Result<Song, ClientError>;
    async fn delete_song(&self, id: i64) -> Result<(), ClientError>;
}

/// `SongApi` over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpSongClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSongClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn songs_url(&self) -> String {
        format!("{}/songs", self.base_url)
    }

    fn song_url(&self, id: i64) -> String {
        format!("{}/songs/{}", self.base_url, id)
    }
}

impl Default for HttpSongClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Pass 2xx responses through; turn anything else into `ClientError::Status`
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SongApi for HttpSongClient {
    async fn list_songs(&self) -> Result<Vec<Song>, ClientError> {
        let response = self.http.get(self.songs_url()).send().await?;
        let songs: Vec<Song> = check_status(response).await?.json().await?;
        debug!(count = songs.len(), "Fetched songs");
        Ok(songs)
    }

    async fn create_song(&self, song: &NewSong) -> Result<Song, ClientError> {
        let response = self.http.post(self.songs_url()).json(song).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn update_song(&self, id: i64, update: &SongUpdate) -> Result<Song, ClientError> {
        let response = self.http.put(self.song_url(id)).json(update).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn delete_song(&self, id: i64) -> Result<(), ClientError> {
        let response = self.http.delete(self.song_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
