//! songboard-api library - song tracker REST service
//!
//! Maps list, create, update, delete and health-check onto the songs store
//! and returns JSON.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    let songs = Router::new()
        .route("/api/songs", get(api::list_songs).post(api::create_song))
        .route(
            "/api/songs/:id",
            put(api::update_song).delete(api::delete_song),
        );

    Router::new()
        .merge(songs)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser clients are served from a different origin
        .layer(CorsLayer::permissive())
}
