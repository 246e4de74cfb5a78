//! HTTP API handlers for songboard-api

pub mod extract;
pub mod health;
pub mod songs;

pub use extract::ApiJson;
pub use health::health_routes;
pub use songs::{create_song, delete_song, list_songs, update_song};
