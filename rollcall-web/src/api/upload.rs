//! Roster upload routes
//!
//! The uploaded file is spooled to a temporary file, fed to the importer,
//! and removed once the import finishes.

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::info;

use crate::api::ApiError;
use crate::roster::import_roster_file;
use crate::AppState;

const UPLOAD_HTML: &str = include_str!("../ui/upload.html");

/// Multipart field carrying the roster file
const ROSTER_FIELD: &str = "roster";

/// GET /upload
///
/// Serves the roster upload form.
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_HTML)
}

/// POST /upload
///
/// Accepts a multipart roster upload, replaces the student roster, then
/// redirects back to the attendance-taking view.
pub async fn upload_roster(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let mut spool: Option<NamedTempFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(ROSTER_FIELD) {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let mut file = NamedTempFile::new().map_err(rollcall_common::Error::Io)?;
        file.write_all(&data).map_err(rollcall_common::Error::Io)?;
        spool = Some(file);
        break;
    }

    let spool = spool.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing multipart field '{}'", ROSTER_FIELD))
    })?;

    let summary = import_roster_file(&state.db, spool.path()).await?;
    info!(
        "Roster upload imported {} students ({} duplicates skipped)",
        summary.inserted,
        summary.duplicates.len()
    );

    // Remove the temporary upload
    spool.close().map_err(rollcall_common::Error::Io)?;

    Ok(Redirect::to("/"))
}
