//! songboard-ui library - kanban board client
//!
//! - [`client`]: HTTP client for the songboard REST API
//! - [`cache`]: client-side mirror of the songs collection
//! - [`render`]: board and card rendering
//! - [`drag`]: drag-and-drop state machine
//! - [`board`]: controller tying them together

pub mod board;
pub mod cache;
pub mod client;
pub mod drag;
pub mod render;

pub use board::{BoardController, Notice};
pub use cache::SongCache;
pub use client::{ClientError, HttpSongClient, SongApi, DEFAULT_API_URL};
pub use drag::{DragController, DragError, DragState, DropIntent};
pub use render::{render_board, render_page, BoardView};
