//! songboard - terminal front end for the song learning board
//!
//! Loads the board from the API, applies one action, and prints the
//! resulting board (or writes it as an HTML page).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use songboard_common::{Difficulty, NewSong, SongUpdate, Status};
use songboard_ui::{render_page, BoardController, HttpSongClient, DEFAULT_API_URL};
use tracing::info;

/// Command-line arguments for songboard
#[derive(Parser, Debug)]
#[command(name = "songboard")]
#[command(about = "Kanban board for songs you are learning")]
#[command(version)]
struct Args {
    /// Base URL of the songboard API
    #[arg(long, default_value = DEFAULT_API_URL, env = "SONGBOARD_API_URL")]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the board (default)
    Board,

    /// Write the board as an HTML page
    Render {
        #[arg(short, long, default_value = "board.html")]
        output: PathBuf,
    },

    /// Add a song
    Add {
        title: String,
        #[arg(long)]
        youtube_url: Option<String>,
        #[arg(long, default_value = "Beginner")]
        difficulty: Difficulty,
        #[arg(long, default_value = "Want to Learn")]
        status: Status,
    },

    /// Edit fields of a song; omitted options keep their value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_url")]
        youtube_url: Option<String>,
        /// Remove the tutorial link
        #[arg(long)]
        clear_url: bool,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        status: Option<Status>,
    },

    /// Drag a card into another column
    Move { id: i64, status: Status },

    /// Delete a song
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the board on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songboard_ui=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    info!("Using API at {}", args.api_url);

    let mut board = BoardController::new(HttpSongClient::new(args.api_url));
    let outcome = run(&mut board, args.command.unwrap_or(Command::Board)).await;

    if let Some(notice) = board.take_notice() {
        eprintln!("{}", notice.message);
        eprintln!("  ({})", notice.detail);
    }
    outcome
}

async fn run(board: &mut BoardController<HttpSongClient>, command: Command) -> Result<()> {
    board.load().await.context("Could not load the board")?;

    match command {
        Command::Board => {}
        Command::Render { output } => {
            std::fs::write(&output, render_page(&board.render()))
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
            return Ok(());
        }
        Command::Add {
            title,
            youtube_url,
            difficulty,
            status,
        } => {
            let mut song = NewSong::new(title, difficulty, status);
            song.youtube_url = youtube_url.filter(|url| !url.trim().is_empty());
            let created = board.add_song(song).await?;
            println!("Added #{} {}", created.id, created.title);
        }
        Command::Edit {
            id,
            title,
            youtube_url,
            clear_url,
            difficulty,
            status,
        } => {
            let update = SongUpdate {
                title,
                youtube_url: if clear_url { Some(None) } else { youtube_url.map(Some) },
                difficulty,
                status,
            };
            if update.is_empty() {
                bail!("Nothing to change for #{}", id);
            }
            board.edit_song(id, update).await?;
        }
        Command::Move { id, status } => {
            board.begin_drag(id)?;
            board.drag_over(status);
            board.drop_on(Some(status)).await?;
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm(&format!("Are you sure you want to delete song #{}?", id))? {
                return Ok(());
            }
            board.delete_song(id).await?;
        }
    }

    print!("{}", board.render().text());
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
