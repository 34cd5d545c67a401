//! rollcall-web library - attendance tracking web service
//!
//! Imports a student roster from a delimited file, records per-session
//! presence against a fixed daily hour allotment, and serves an
//! attendance-percentage report.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod attendance;
pub mod roster;

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
    use axum::routing::{get, post};
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/", get(api::roster_view))
        .route("/save-attendance", post(api::save_attendance))
        .route("/attendance-report", get(api::attendance_report))
        .route("/upload", get(api::upload_form).post(api::upload_roster))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
