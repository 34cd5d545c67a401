//! Attendance recording route

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiError;
use crate::attendance::{record_attendance, MarkingMode};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveAttendanceRequest {
    pub date: String,
    #[serde(rename = "type")]
    pub session_type: String,
    /// Ids of the marked students, as strings; polarity depends on `mode`
    #[serde(rename = "presentStudents", default)]
    pub present_students: Vec<String>,
    pub mode: MarkingMode,
}

#[derive(Debug, Serialize)]
pub struct SaveAttendanceResponse {
    pub success: bool,
}

/// POST /save-attendance
///
/// Writes one attendance row per enrolled student for the submitted
/// (date, type) session. Append-only: resubmitting the same session
/// inserts a second full row set.
pub async fn save_attendance(
    State(state): State<AppState>,
    Json(req): Json<SaveAttendanceRequest>,
) -> Result<Json<SaveAttendanceResponse>, ApiError> {
    let written = record_attendance(
        &state.db,
        &req.date,
        &req.session_type,
        &req.present_students,
        req.mode,
    )
    .await?;

    info!(
        "Recorded {} attendance rows for {} ({})",
        written, req.date, req.session_type
    );

    Ok(Json(SaveAttendanceResponse { success: true }))
}
