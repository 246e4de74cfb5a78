//! # SongBoard Common Library
//!
//! Shared code for the SongBoard API service and board client:
//! - Song data model (difficulty and learning-status enums)
//! - Error types
//! - Configuration loading and root folder resolution
//! - Persistence store for the `songs` table (`sqlx` feature)

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{Difficulty, NewSong, Song, SongUpdate, Status};
