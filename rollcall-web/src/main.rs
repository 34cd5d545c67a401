//! Rollcall attendance tracker - main entry point
//!
//! Imports a student roster, records per-session attendance, and serves
//! the attendance report over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rollcall_common::config::{prepare_data_folder, resolve_data_folder};
use rollcall_common::db::init_database;
use rollcall_web::{build_router, AppState};

/// Command-line arguments for rollcall-web
#[derive(Parser, Debug)]
#[command(name = "rollcall-web")]
#[command(about = "Attendance tracking web service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "ROLLCALL_PORT")]
    port: u16,

    /// Folder holding the attendance database
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Roster file to import on startup (replaces the current roster)
    #[arg(short, long)]
    roster: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Rollcall attendance tracker v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let data_folder = resolve_data_folder(args.data_folder.as_deref());
    let db_path = prepare_data_folder(&data_folder)
        .context("Failed to prepare data folder")?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    // Optional roster load on startup; the roster can also be replaced
    // later through POST /upload
    if let Some(roster_path) = &args.roster {
        match rollcall_web::roster::import_roster_file(&pool, roster_path).await {
            Ok(summary) => info!(
                "Initial roster load completed: {} students",
                summary.inserted
            ),
            Err(e) => warn!(
                "Failed to load roster {}: {}",
                roster_path.display(),
                e
            ),
        }
    }

    let state = AppState::new(pool.clone());
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("rollcall-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // In-flight requests have drained; release the storage connection
    pool.close().await;
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
