//! Board renderer
//!
//! Builds the four status columns from the song cache. Every render rebuilds
//! each column's content from scratch; there is no incremental diffing.

use songboard_common::{Song, Status};
use std::fmt::Write;

use crate::cache::SongCache;
use crate::drag::DragController;

/// One rendered card
#[derive(Debug, Clone)]
pub struct CardView {
    pub song: Song,
    pub html: String,
}

/// One rendered status column
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub status: Status,
    pub highlighted: bool,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn song_ids(&self) -> Vec<i64> {
        self.cards.iter().map(|c| c.song.id).collect()
    }

    /// Column markup: header with count, then the cards container
    pub fn html(&self) -> String {
        let status = escape_html(self.status.as_str());
        let container_class = if self.highlighted {
            "cards-container drag-over"
        } else {
            "cards-container"
        };

        let mut html = String::new();
        let _ = write!(
            html,
            r#"<div class="kanban-column" data-status="{status}"><div class="column-header"><h2>{status}</h2><span class="song-count">{count}</span></div><div class="{container_class}" data-status="{status}">"#,
            count = self.count(),
        );
        for card in &self.cards {
            html.push_str(&card.html);
        }
        html.push_str("</div></div>");
        html
    }
}

/// The whole board, columns in `Status::ALL` order
#[derive(Debug, Clone)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, status: Status) -> &ColumnView {
        // Columns are built from Status::ALL, so every status is present
        &self.columns[Status::ALL
            .iter()
            .position(|s| *s == status)
            .unwrap_or_default()]
    }

    pub fn html(&self) -> String {
        let mut html = String::from(r#"<div class="kanban-board">"#);
        for column in &self.columns {
            html.push_str(&column.html());
        }
        html.push_str("</div>");
        html
    }

    /// Plain-text board for terminals
    pub fn text(&self) -> String {
        let mut out = String::new();
        for column in &self.columns {
            let _ = writeln!(out, "{} ({})", column.status, column.count());
            for card in &column.cards {
                let song = &card.song;
                let _ = write!(out, "  #{} {} [{}]", song.id, song.title, song.difficulty);
                if let Some(url) = &song.youtube_url {
                    let _ = write!(out, " ▶ {}", url);
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Partition the cache into the four columns
pub fn render_board(cache: &SongCache, drag: &DragController) -> BoardView {
    let dragged = drag.dragged_song();

    let columns = Status::ALL
        .into_iter()
        .map(|status| ColumnView {
            status,
            highlighted: drag.is_highlighted(status),
            cards: cache
                .by_status(status)
                .map(|song| CardView {
                    html: render_card(song, dragged == Some(song.id)),
                    song: song.clone(),
                })
                .collect(),
        })
        .collect();

    BoardView { columns }
}

/// Markup for one card
pub fn render_card(song: &Song, dragging: bool) -> String {
    let class = if dragging { "song-card dragging" } else { "song-card" };
    let youtube_link = song
        .youtube_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener" class="youtube-link">▶ Watch Tutorial</a>"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="{class}" draggable="true" data-song-id="{id}"><div class="card-header"><div class="song-title">{title}</div><button class="delete-btn" data-song-id="{id}">×</button></div><div class="difficulty-badge difficulty-{difficulty}">{difficulty}</div>{youtube_link}</div>"#,
        id = song.id,
        title = escape_html(&song.title),
        difficulty = song.difficulty,
    )
}

/// Complete HTML document for the board
pub fn render_page(view: &BoardView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Song Learning Board</title>
<style>
body {{ font-family: sans-serif; margin: 0; padding: 1rem; background: #f4f5f7; }}
.kanban-board {{ display: flex; gap: 1rem; align-items: flex-start; }}
.kanban-column {{ flex: 1; background: #ebecf0; border-radius: 6px; padding: 0.5rem; }}
.column-header {{ display: flex; justify-content: space-between; align-items: center; }}
.column-header h2 {{ font-size: 1rem; margin: 0.25rem 0; }}
.cards-container {{ min-height: 4rem; }}
.cards-container.drag-over {{ background: #dfe1e6; }}
.song-card {{ background: #fff; border-radius: 4px; padding: 0.5rem; margin: 0.5rem 0; }}
.song-card.dragging {{ opacity: 0.5; }}
.card-header {{ display: flex; justify-content: space-between; }}
.difficulty-badge {{ display: inline-block; font-size: 0.75rem; padding: 0 0.4rem; border-radius: 3px; }}
.difficulty-Beginner {{ background: #e3fcef; }}
.difficulty-Intermediate {{ background: #fffae6; }}
.difficulty-Advanced {{ background: #ffebe6; }}
.youtube-link {{ display: block; margin-top: 0.25rem; font-size: 0.8rem; }}
</style>
</head>
<body>
<h1>Song Learning Board</h1>
{board}
</body>
</html>
"#,
        board = view.html()
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
