//! Errors raised by the songs store and configuration loading

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Any SQLite failure, including CHECK constraint violations
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Song {0} not found")]
    SongNotFound(i64),

    /// A stored row could not be turned back into a [`crate::Song`]
    #[error("Song {id} is unreadable: {reason}")]
    CorruptRow { id: i64, reason: String },

    /// Text that is not one of a closed set of values
    #[error("{field} must be one of {expected} (got '{value}')")]
    UnknownValue {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Config file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
