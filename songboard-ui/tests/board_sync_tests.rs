//! End-to-end tests: board controller over HTTP against a live API
//!
//! Each test serves the real router on an ephemeral port backed by a fresh
//! in-memory database.

use std::net::SocketAddr;

use songboard_api::{build_router, AppState};
use songboard_common::db::init_in_memory;
use songboard_common::{Difficulty, NewSong, SongUpdate, Status};
use songboard_ui::board::{DELETE_FAILED, LOAD_FAILED};
use songboard_ui::{BoardController, HttpSongClient, SongApi};
use tokio::net::TcpListener;

/// Test helper: start the API and return its address
async fn spawn_api() -> SocketAddr {
    let db = init_in_memory().await.expect("Should create in-memory database");
    let app = build_router(AppState::new(db));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> HttpSongClient {
    HttpSongClient::new(format!("http://{}/api", addr))
}

#[tokio::test]
async fn test_drag_to_learned_updates_server_and_counts() {
    let addr = spawn_api().await;
    let seed = client(addr);
    let wanted = seed
        .create_song(&NewSong::new("Alma Llanera", Difficulty::Intermediate, Status::CurrentlyLearning))
        .await
        .unwrap();
    seed.create_song(&NewSong::new("Pajarillo", Difficulty::Advanced, Status::CurrentlyLearning))
        .await
        .unwrap();

    let mut board = BoardController::new(client(addr));
    board.load().await.unwrap();
    assert_eq!(board.render().column(Status::CurrentlyLearning).count(), 2);

    board.begin_drag(wanted.id).unwrap();
    board.drag_over(Status::Learned);
    let moved = board.drop_on(Some(Status::Learned)).await.unwrap().unwrap();

    assert_eq!(moved.status, Status::Learned);
    assert_eq!(moved.title, "Alma Llanera");
    assert_eq!(moved.difficulty, Difficulty::Intermediate);

    let view = board.render();
    assert_eq!(view.column(Status::CurrentlyLearning).count(), 1);
    assert_eq!(view.column(Status::Learned).song_ids(), vec![wanted.id]);
    assert!(board.notice().is_none());

    // A fresh load agrees with the patched cache
    let mut reloaded = BoardController::new(client(addr));
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.render().column(Status::Learned).song_ids(), vec![wanted.id]);
}

#[tokio::test]
async fn test_add_then_list_is_newest_first() {
    let addr = spawn_api().await;
    let mut board = BoardController::new(client(addr));
    board.load().await.unwrap();
    assert!(board.cache().is_empty());

    let first = board
        .add_song(NewSong::new("Caballo Viejo", Difficulty::Beginner, Status::WantToLearn))
        .await
        .unwrap();
    let second = board
        .add_song(
            NewSong::new("Moliendo Café", Difficulty::Beginner, Status::WantToLearn)
                .with_youtube_url("https://youtu.be/mc"),
        )
        .await
        .unwrap();
    assert!(second.id > first.id);

    // Appended locally, newest first after reload
    assert_eq!(
        board.render().column(Status::WantToLearn).song_ids(),
        vec![first.id, second.id]
    );
    board.load().await.unwrap();
    assert_eq!(
        board.render().column(Status::WantToLearn).song_ids(),
        vec![second.id, first.id]
    );
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let addr = spawn_api().await;
    let mut board = BoardController::new(client(addr));
    let song = board
        .add_song(NewSong::new("Sabana", Difficulty::Beginner, Status::Mastered))
        .await
        .unwrap();

    board.delete_song(song.id).await.unwrap();
    assert!(board.cache().is_empty());

    let err = board.delete_song(song.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(board.notice().unwrap().message, DELETE_FAILED);
}

#[tokio::test]
async fn test_clear_youtube_url() {
    let addr = spawn_api().await;
    let mut board = BoardController::new(client(addr));
    let song = board
        .add_song(
            NewSong::new("Quirpa", Difficulty::Advanced, Status::WantToLearn)
                .with_youtube_url("https://youtu.be/q"),
        )
        .await
        .unwrap();
    assert_eq!(song.youtube_url.as_deref(), Some("https://youtu.be/q"));

    let retitled = board
        .edit_song(
            song.id,
            SongUpdate {
                title: Some("Quirpa Guatireña".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(retitled.youtube_url.as_deref(), Some("https://youtu.be/q"));

    let cleared = board
        .edit_song(
            song.id,
            SongUpdate {
                youtube_url: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.youtube_url, None);
    assert_eq!(cleared.title, "Quirpa Guatireña");
    assert!(!board.render().html().contains("youtube-link"));
}

#[tokio::test]
async fn test_unreachable_api_keeps_cache() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut board = BoardController::new(client(addr));
    let err = board.load().await.unwrap_err();

    assert!(!err.is_not_found());
    assert!(board.cache().is_empty());
    assert_eq!(board.notice().unwrap().message, LOAD_FAILED);
    assert_eq!(board.render().columns.len(), 4);
}
