//! Axum route handlers for the interview flow.

use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
        FromRequest, Multipart, Query, Request, State,
    },
    http::header::CONTENT_TYPE,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::interview::state_machine::SubmitOutcome;
use crate::models::interview::{Metrics, NewSession};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StartInterviewRequest {
    #[serde(default)]
    pub job_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartInterviewResponse {
    pub success: bool,
    pub session_id: String,
    pub message: String,
    pub first_question: String,
    pub total_questions: usize,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    /// Accepted for client compatibility; audio is not analysed.
    #[serde(default)]
    #[allow(dead_code)]
    pub audio: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct InterviewCompleteResponse {
    pub success: bool,
    pub interview_complete: bool,
    pub message: String,
    pub metrics: Metrics,
    pub total_questions: usize,
    pub total_answers: usize,
}

#[derive(Debug, Serialize)]
pub struct NextQuestionResponse {
    pub success: bool,
    pub interview_complete: bool,
    pub next_question: String,
    pub question_number: usize,
    pub total_questions: usize,
    pub metrics: Metrics,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubmitAnswerResponse {
    Complete(InterviewCompleteResponse),
    NextQuestion(NextQuestionResponse),
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub success: bool,
    pub metrics: Metrics,
    pub current_question: usize,
    pub total_questions: usize,
}

/// A missing or empty id is treated exactly like an unknown one.
pub fn require_session_id(session_id: Option<String>) -> Result<String, AppError> {
    session_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::SessionNotFound)
}

pub fn session_query(query: Result<Query<SessionQuery>, QueryRejection>) -> Result<String, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    require_session_id(params.session_id)
}

// ────────────────────────────────────────────────────────────────────────────
// Body parsing for /start_interview
// ────────────────────────────────────────────────────────────────────────────

fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(e.body_text())
}

/// Accepts multipart form data (`job_role` text + `resume` file), a JSON body,
/// or no body at all.
async fn read_start_request(request: Request) -> Result<NewSession, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return read_multipart(multipart).await;
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NewSession::default());
    }

    let parsed: StartInterviewRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;
    Ok(NewSession {
        job_role: parsed.job_role,
        resume_filename: None,
    })
}

async fn read_multipart(mut multipart: Multipart) -> Result<NewSession, AppError> {
    let mut new = NewSession::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_role") => {
                new.job_role = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("resume") => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!("Received resume {:?} ({} bytes)", file_name, data.len());
                new.resume_filename = file_name;
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }
    Ok(new)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /start_interview
///
/// Creates a session positioned at the first question.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<StartInterviewResponse>, AppError> {
    let new = read_start_request(request).await?;
    let session = state
        .sessions
        .create(new, &state.questions, state.metrics.as_ref())
        .await;

    Ok(Json(StartInterviewResponse {
        success: true,
        session_id: session.session_id.clone(),
        message: "Interview session started successfully".to_string(),
        first_question: state.questions.first().to_string(),
        total_questions: session.total_questions(),
    }))
}

/// POST /submit_answer
///
/// Records the answer to the current question and returns either the next
/// question or the completion summary.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    payload: Result<Json<SubmitAnswerRequest>, JsonRejection>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let session_id = require_session_id(request.session_id)?;

    let (outcome, session) = state
        .sessions
        .submit(
            &session_id,
            request.answer.unwrap_or_default(),
            state.metrics.as_ref(),
        )
        .await
        .inspect_err(|e| warn!("Rejected answer for {session_id}: {e}"))?;

    let response = match outcome {
        SubmitOutcome::Complete => SubmitAnswerResponse::Complete(InterviewCompleteResponse {
            success: true,
            interview_complete: true,
            message: "Interview completed successfully".to_string(),
            metrics: session.metrics,
            total_questions: session.total_questions(),
            total_answers: session.answers.len(),
        }),
        SubmitOutcome::NextQuestion {
            question,
            question_number,
        } => SubmitAnswerResponse::NextQuestion(NextQuestionResponse {
            success: true,
            interview_complete: false,
            next_question: question,
            question_number,
            total_questions: session.total_questions(),
            metrics: session.metrics,
        }),
    };
    Ok(Json(response))
}

/// GET /get_metrics?session_id=
pub async fn handle_get_metrics(
    State(state): State<AppState>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Result<Json<MetricsResponse>, AppError> {
    let session_id = session_query(query)?;
    let session = state.sessions.snapshot(&session_id).await?;

    Ok(Json(MetricsResponse {
        success: true,
        metrics: session.metrics,
        current_question: session.current_question,
        total_questions: session.total_questions(),
    }))
}
