pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::report::handlers::handle_get_report;
use crate::state::AppState;

pub const ENDPOINTS: [&str; 5] = [
    "POST /start_interview",
    "POST /submit_answer",
    "GET /get_report",
    "GET /get_metrics",
    "GET /health",
];

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/start_interview", post(handlers::handle_start_interview))
        .route("/submit_answer", post(handlers::handle_submit_answer))
        .route("/get_metrics", get(handlers::handle_get_metrics))
        .route("/get_report", get(handle_get_report))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::interview::metrics::FixedMetricsSampler;
    use crate::interview::QuestionBank;
    use crate::models::interview::Metrics;

    const METRICS: Metrics = Metrics {
        attention: 84,
        positivity: 90,
        confidence: 78,
    };

    fn app() -> Router {
        let state = AppState::new(Config::default(), QuestionBank::default())
            .with_metrics(Arc::new(FixedMetricsSampler(METRICS)));
        build_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, header::HeaderMap) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), headers)
    }

    async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body, _) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn start(app: &Router, job_role: &str) -> String {
        let (status, body) =
            send_json(app, post_json("/start_interview", json!({ "job_role": job_role }))).await;
        assert_eq!(status, StatusCode::OK);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_json(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_full_interview_scenario() {
        let app = app();
        let bank = QuestionBank::default().snapshot();

        let (status, body) = send_json(
            &app,
            post_json("/start_interview", json!({ "job_role": "Backend Engineer" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["first_question"], bank[0].as_str());
        assert_eq!(body["total_questions"], 3);
        let session_id = body["session_id"].as_str().unwrap().to_string();

        let (status, body) = send_json(
            &app,
            post_json(
                "/submit_answer",
                json!({ "session_id": session_id, "answer": "I have 5 years of experience" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["interview_complete"], false);
        assert_eq!(body["next_question"], bank[1].as_str());
        assert_eq!(body["question_number"], 2);
        assert_eq!(body["metrics"]["attention"], 84);

        let (_, body) = send_json(
            &app,
            post_json("/submit_answer", json!({ "session_id": session_id, "answer": "two" })),
        )
        .await;
        assert_eq!(body["interview_complete"], false);
        assert_eq!(body["question_number"], 3);

        let (status, body) = send_json(
            &app,
            post_json("/submit_answer", json!({ "session_id": session_id, "answer": "three" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["interview_complete"], true);
        assert_eq!(body["total_answers"], 3);
        assert_eq!(body["total_questions"], 3);

        let (status, body) =
            send_json(&app, get(&format!("/get_metrics?session_id={session_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_question"], 3);
        assert_eq!(body["metrics"]["confidence"], 78);

        let (status, pdf, headers) =
            send(&app, get(&format!("/get_report?session_id={session_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains(&format!("interview_report_{session_id}.pdf")));
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_submit_after_completion_conflicts() {
        let app = app();
        let session_id = start(&app, "QA").await;
        for _ in 0..3 {
            let (status, _) = send_json(
                &app,
                post_json("/submit_answer", json!({ "session_id": session_id, "answer": "a" })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send_json(
            &app,
            post_json("/submit_answer", json!({ "session_id": session_id, "answer": "late" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INTERVIEW_COMPLETE");

        let (_, body) =
            send_json(&app, get(&format!("/get_metrics?session_id={session_id}"))).await;
        assert_eq!(body["current_question"], 3);
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected_everywhere() {
        let app = app();
        for uri in ["/get_metrics?session_id=nope", "/get_report?session_id=nope", "/get_report"] {
            let (status, body) = send_json(&app, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Invalid session ID");
        }

        let (status, body) = send_json(
            &app,
            post_json("/submit_answer", json!({ "session_id": "nope", "answer": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/submit_answer")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send_json(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_start_without_body_uses_defaults() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/start_interview")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send_json(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_questions"], 3);
    }

    #[tokio::test]
    async fn test_start_with_multipart_resume() {
        let state = AppState::new(Config::default(), QuestionBank::default());
        let sessions = Arc::clone(&state.sessions);
        let app = build_router(state);

        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"job_role\"\r\n\r\n",
            "Data Scientist\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n",
            "Content-Type: application/pdf\r\n\r\n",
            "%PDF-1.4 not really\r\n",
            "--XBOUNDARY--\r\n",
        );
        let request = Request::builder()
            .method("POST")
            .uri("/start_interview")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send_json(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let session = sessions
            .snapshot(body["session_id"].as_str().unwrap())
            .await
            .unwrap();
        assert_eq!(session.job_role, "Data Scientist");
        assert_eq!(session.resume_filename, "cv.pdf");
    }
}
