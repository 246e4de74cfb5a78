//! Client-side mirror of the songs collection
//!
//! The cache keeps songs in the order the last full list returned and is
//! never re-sorted locally. It is only ever patched with canonical rows the
//! server returned, and it is the sole input to rendering.

use songboard_common::{Song, Status};

#[derive(Debug, Clone, Default)]
pub struct SongCache {
    songs: Vec<Song>,
}

impl SongCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection (initial load)
    pub fn replace_all(&mut self, songs: Vec<Song>) {
        self.songs = songs;
    }

    /// Add a newly created song at the end
    pub fn append(&mut self, song: Song) {
        self.songs.push(song);
    }

    /// Swap in the canonical row for an existing id
    ///
    /// Returns `false` (and changes nothing) when the id is not cached.
    pub fn replace(&mut self, song: Song) -> bool {
        match self.songs.iter_mut().find(|s| s.id == song.id) {
            Some(slot) => {
                *slot = song;
                true
            }
            None => false,
        }
    }

    /// Drop the entry with the given id; returns whether one was removed
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.songs.len();
        self.songs.retain(|s| s.id != id);
        self.songs.len() != before
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, id: i64) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Songs in one column, in cache order
    pub fn by_status(&self, status: Status) -> impl Iterator<Item = &Song> + '_ {
        self.songs.iter().filter(move |s| s.status == status)
    }
}
