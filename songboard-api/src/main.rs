//! songboard-api - Song learning tracker REST service
//!
//! Serves the songs collection over HTTP/JSON for the kanban board client.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use songboard_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use songboard_common::db::init_database;
use songboard_api::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MODULE_NAME: &str = "songboard-api";
const DEFAULT_PORT: u16 = 3000;

/// Command-line arguments for songboard-api
#[derive(Parser, Debug)]
#[command(name = "songboard-api")]
#[command(about = "REST service for the song learning board")]
#[command(version)]
struct Args {
    /// Port to listen on (falls back to the TOML config, then 3000)
    #[arg(short, long, env = "SONGBOARD_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "SONGBOARD_HOST")]
    host: std::net::IpAddr,

    /// Root folder holding songboard.db
    #[arg(short, long, env = "SONGBOARD_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Explicit database file (overrides the root folder)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = TomlConfig::load_for_module(MODULE_NAME).unwrap_or_default();

    // RUST_LOG wins over the config file's level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "songboard_api={level},songboard_common={level},tower_http={level}",
                    level = toml_config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting SongBoard API (songboard-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db_path = match args.database {
        Some(path) => path,
        None => {
            let root_folder = RootFolderResolver::new(MODULE_NAME)
                .with_cli_arg(args.root_folder)
                .resolve();
            let initializer = RootFolderInitializer::new(root_folder);
            initializer
                .ensure_directory_exists()
                .context("Failed to create root folder")?;
            info!("Root folder: {}", initializer.root_folder().display());
            if !initializer.database_exists() {
                info!("No database yet, a new one will be created");
            }
            initializer.database_path()
        }
    };
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let app = build_router(AppState::new(pool));

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(args.host, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("songboard-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
