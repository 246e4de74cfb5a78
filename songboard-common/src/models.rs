//! Song data model
//!
//! A song is the only persisted entity. `difficulty` and `status` are closed
//! sets; their string forms are the wire and column values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Song record as stored and as returned by the API (the canonical row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub youtube_url: Option<String>,
    pub difficulty: Difficulty,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// Playing difficulty of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::UnknownValue {
                field: "difficulty",
                expected: "Beginner, Intermediate, Advanced",
                value: s.to_string(),
            })
    }
}

/// Learning stage; one board column per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Want to Learn")]
    WantToLearn,
    #[serde(rename = "Currently Learning")]
    CurrentlyLearning,
    #[serde(rename = "Learned")]
    Learned,
    #[serde(rename = "Mastered")]
    Mastered,
}

impl Status {
    /// Board columns, left to right
    pub const ALL: [Status; 4] = [
        Status::WantToLearn,
        Status::CurrentlyLearning,
        Status::Learned,
        Status::Mastered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::WantToLearn => "Want to Learn",
            Status::CurrentlyLearning => "Currently Learning",
            Status::Learned => "Learned",
            Status::Mastered => "Mastered",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| Error::UnknownValue {
                field: "status",
                expected: "Want to Learn, Currently Learning, Learned, Mastered",
                value: s.to_string(),
            })
    }
}

/// Fields supplied when creating a song; id and created_at come from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub youtube_url: Option<String>,
    pub difficulty: Difficulty,
    pub status: Status,
}

impl NewSong {
    pub fn new(title: impl Into<String>, difficulty: Difficulty, status: Status) -> Self {
        Self {
            title: title.into(),
            youtube_url: None,
            difficulty,
            status,
        }
    }

    pub fn with_youtube_url(mut self, url: impl Into<String>) -> Self {
        self.youtube_url = Some(url.into());
        self
    }
}

/// Partial update of a song
///
/// `None` keeps the current value. For `youtube_url`, `Some(None)` clears the
/// link; on the wire that is an explicit `null`, while an absent key is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub youtube_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl SongUpdate {
    /// Update carrying only a new status (a drag-and-drop move)
    pub fn status_only(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.youtube_url.is_none()
            && self.difficulty.is_none()
            && self.status.is_none()
    }
}

/// Deserialize a field that was present in the input, even if `null`
///
/// Pair with `#[serde(default)]` so an absent key stays `None` while a present
/// key (including `null`) becomes `Some(..)`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
