//! Board controller
//!
//! Owns the song cache and the drag controller and is their only writer.
//! Every mutation goes to the API first; the cache is patched with the row
//! the server returns only after the call succeeds. On failure the cache is
//! left as it was and a [`Notice`] is recorded for the user. Each new
//! action starts by clearing the previous notice.

use songboard_common::{NewSong, Song, SongUpdate, Status};
use tracing::{error, info};

use crate::cache::SongCache;
use crate::client::{ClientError, SongApi};
use crate::drag::{DragController, DragError, DropIntent};
use crate::render::{render_board, BoardView};

pub const LOAD_FAILED: &str = "Failed to load songs. Make sure the backend is running.";
pub const ADD_FAILED: &str = "Failed to add song. Please try again.";
pub const EDIT_FAILED: &str = "Failed to update song. Please try again.";
pub const MOVE_FAILED: &str = "Failed to update song status. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete song. Please try again.";

/// User-visible failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: &'static str,
    pub detail: String,
}

pub struct BoardController<A: SongApi> {
    api: A,
    cache: SongCache,
    drag: DragController,
    notice: Option<Notice>,
}

impl<A: SongApi> BoardController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: SongCache::new(),
            drag: DragController::new(),
            notice: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &SongCache {
        &self.cache
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Failure of the most recent action, if it failed
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Current board, built from the cache only
    pub fn render(&self) -> BoardView {
        render_board(&self.cache, &self.drag)
    }

    /// Replace the cache with the server's list
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.notice = None;
        let result = self.api.list_songs().await;
        let songs = result.map_err(|e| self.fail(LOAD_FAILED, e))?;

        info!(count = songs.len(), "Loaded songs");
        self.cache.replace_all(songs);
        Ok(())
    }

    pub async fn add_song(&mut self, song: NewSong) -> Result<Song, ClientError> {
        self.notice = None;
        let result = self.api.create_song(&song).await;
        let created = result.map_err(|e| self.fail(ADD_FAILED, e))?;

        self.cache.append(created.clone());
        Ok(created)
    }

    pub async fn edit_song(&mut self, id: i64, update: SongUpdate) -> Result<Song, ClientError> {
        self.apply_update(id, &update, EDIT_FAILED).await
    }

    pub async fn delete_song(&mut self, id: i64) -> Result<(), ClientError> {
        self.notice = None;
        let result = self.api.delete_song(id).await;
        result.map_err(|e| self.fail(DELETE_FAILED, e))?;

        self.cache.remove(id);
        Ok(())
    }

    /// Pick up a card
    pub fn begin_drag(&mut self, song_id: i64) -> Result<(), DragError> {
        if !self.cache.contains(song_id) {
            return Err(DragError::UnknownSong(song_id));
        }
        self.drag.drag_start(song_id)
    }

    /// Pointer entered a column
    pub fn drag_over(&mut self, status: Status) {
        self.drag.drag_enter(status);
    }

    /// Pointer left a column
    pub fn drag_leave(&mut self, status: Status) {
        self.drag.drag_leave(status);
    }

    /// Drag ended without a drop
    pub fn cancel_drag(&mut self) {
        self.drag.drag_end();
    }

    /// Release the dragged card over `target` (or outside every column)
    ///
    /// A drop over a column sends exactly one update carrying only the new
    /// status. Returns the updated row, or `None` when nothing was sent.
    pub async fn drop_on(&mut self, target: Option<Status>) -> Result<Option<Song>, ClientError> {
        match self.drag.drop_on(target) {
            Some(DropIntent { song_id, status }) => {
                let update = SongUpdate::status_only(status);
                self.apply_update(song_id, &update, MOVE_FAILED)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    async fn apply_update(
        &mut self,
        id: i64,
        update: &SongUpdate,
        failure: &'static str,
    ) -> Result<Song, ClientError> {
        self.notice = None;
        let result = self.api.update_song(id, update).await;
        let updated = result.map_err(|e| self.fail(failure, e))?;

        self.cache.replace(updated.clone());
        Ok(updated)
    }

    fn fail(&mut self, message: &'static str, err: ClientError) -> ClientError {
        error!("{}: {}", message, err);
        self.notice = Some(Notice {
            message,
            detail: err.to_string(),
        });
        err
    }
}
