//! Attendance report route

use axum::{extract::State, Json};

use crate::api::ApiError;
use crate::attendance::{generate_report, ReportRow};
use crate::AppState;

/// GET /attendance-report
///
/// Per-student attendance summary, ordered by registration number.
pub async fn attendance_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportRow>>, ApiError> {
    let report = generate_report(&state.db).await?;
    Ok(Json(report))
}
