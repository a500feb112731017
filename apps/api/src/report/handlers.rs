//! Axum route handler for the PDF report download.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::interview::handlers::{session_query, SessionQuery};
use crate::report::{build_report, report_filename};
use crate::state::AppState;

/// GET /get_report?session_id=
///
/// Renders the session's report as a PDF attachment. Works at any point in the
/// interview; only answers recorded so far appear in the transcript.
pub async fn handle_get_report(
    State(state): State<AppState>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let session_id = session_query(query)?;
    let session = state.sessions.snapshot(&session_id).await?;
    let page_config = Arc::clone(&state.page_config);

    let pdf = tokio::task::spawn_blocking(move || build_report(&session, &page_config))
        .await
        .context("Report rendering task failed")??;

    info!("Generated report for {session_id} ({} bytes)", pdf.len());

    let disposition = format!("attachment; filename=\"{}\"", report_filename(&session_id));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}
