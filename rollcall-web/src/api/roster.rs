//! Roster viewing route

use axum::{extract::State, Json};
use rollcall_common::db::models::Student;

use crate::api::ApiError;
use crate::AppState;

/// GET /
///
/// Returns the current roster ordered by registration number, for the
/// attendance-taking view.
pub async fn roster_view(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = crate::roster::list_students(&state.db).await?;
    Ok(Json(students))
}
