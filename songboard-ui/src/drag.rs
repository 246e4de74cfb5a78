//! Drag-and-drop controller
//!
//! Two states: `Idle` and `Dragging { song_id }`. Only one card can be in
//! motion at a time. Hovering columns only toggles highlighting; the single
//! side effect is the [`DropIntent`] produced when a card is released over a
//! column.

use songboard_common::Status;
use std::collections::HashSet;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { song_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("Song {song_id} is already being dragged")]
    AlreadyDragging { song_id: i64 },

    #[error("Song {0} is not on the board")]
    UnknownSong(i64),
}

/// Status change requested by releasing a card over a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropIntent {
    pub song_id: i64,
    pub status: Status,
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    highlighted: HashSet<Status>,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
            highlighted: HashSet::new(),
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Song currently in motion, if any
    pub fn dragged_song(&self) -> Option<i64> {
        match self.state {
            DragState::Dragging { song_id } => Some(song_id),
            DragState::Idle => None,
        }
    }

    pub fn is_highlighted(&self, status: Status) -> bool {
        self.highlighted.contains(&status)
    }

    /// Idle → Dragging
    pub fn drag_start(&mut self, song_id: i64) -> Result<(), DragError> {
        if let DragState::Dragging { song_id: active } = self.state {
            return Err(DragError::AlreadyDragging { song_id: active });
        }
        trace!(song_id, "drag start");
        self.state = DragState::Dragging { song_id };
        Ok(())
    }

    /// Pointer entered a column; highlights it while a drag is active
    pub fn drag_enter(&mut self, status: Status) -> bool {
        if self.dragged_song().is_none() {
            return false;
        }
        self.highlighted.insert(status)
    }

    /// Pointer left a column
    pub fn drag_leave(&mut self, status: Status) {
        self.highlighted.remove(&status);
    }

    /// Release the card; Dragging → Idle
    ///
    /// `target` is the column under the pointer, `None` when released
    /// outside every column (no request is issued and the card snaps back on
    /// the next render).
    pub fn drop_on(&mut self, target: Option<Status>) -> Option<DropIntent> {
        let song_id = self.dragged_song();
        self.reset();

        let intent = song_id.zip(target).map(|(song_id, status)| DropIntent { song_id, status });
        trace!(?intent, "drop");
        intent
    }

    /// Drag ended without a drop
    pub fn drag_end(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.highlighted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let drag = DragController::new();
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.dragged_song(), None);
    }

    #[test]
    fn test_drop_over_column_yields_intent_and_returns_to_idle() {
        let mut drag = DragController::new();
        drag.drag_start(4).unwrap();
        assert_eq!(drag.state(), DragState::Dragging { song_id: 4 });

        let intent = drag.drop_on(Some(Status::Learned));

        assert_eq!(
            intent,
            Some(DropIntent {
                song_id: 4,
                status: Status::Learned
            })
        );
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_outside_columns_yields_nothing() {
        let mut drag = DragController::new();
        drag.drag_start(4).unwrap();

        assert_eq!(drag.drop_on(None), None);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_while_idle_yields_nothing() {
        let mut drag = DragController::new();
        assert_eq!(drag.drop_on(Some(Status::Mastered)), None);
    }

    #[test]
    fn test_second_drag_rejected_while_active() {
        let mut drag = DragController::new();
        drag.drag_start(1).unwrap();

        assert_eq!(
            drag.drag_start(2),
            Err(DragError::AlreadyDragging { song_id: 1 })
        );
        assert_eq!(drag.dragged_song(), Some(1));
    }

    #[test]
    fn test_highlight_only_while_dragging() {
        let mut drag = DragController::new();
        assert!(!drag.drag_enter(Status::Learned));
        assert!(!drag.is_highlighted(Status::Learned));

        drag.drag_start(1).unwrap();
        assert!(drag.drag_enter(Status::Learned));
        assert!(drag.is_highlighted(Status::Learned));

        drag.drag_leave(Status::Learned);
        assert!(!drag.is_highlighted(Status::Learned));
    }

    #[test]
    fn test_drop_and_end_clear_highlights() {
        let mut drag = DragController::new();
        drag.drag_start(1).unwrap();
        drag.drag_enter(Status::Mastered);
        drag.drop_on(Some(Status::Mastered));
        assert!(!drag.is_highlighted(Status::Mastered));

        drag.drag_start(2).unwrap();
        drag.drag_enter(Status::Learned);
        drag.drag_end();
        assert!(!drag.is_highlighted(Status::Learned));
        assert_eq!(drag.state(), DragState::Idle);

        // A new drag may begin once the previous one ended
        assert!(drag.drag_start(3).is_ok());
    }
}
