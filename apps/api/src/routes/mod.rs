pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extract::handlers as extract_handlers;
use crate::review::handlers as review_handlers;
use crate::state::AppState;

/// Upload cap for the PDF route.
const PDF_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Review API
        .route(
            "/api/v1/review/resume",
            post(review_handlers::handle_review_resume),
        )
        .route(
            "/api/v1/review/linkedin",
            post(review_handlers::handle_review_linkedin),
        )
        // Extraction API
        .route(
            "/api/v1/extract/pdf",
            post(extract_handlers::handle_extract_pdf).layer(DefaultBodyLimit::max(PDF_BODY_LIMIT)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::review::generator::ReviewGenerator;
    use crate::review::models::DocumentInput;
    use crate::review::profile::DocumentKind;
    use crate::throttle::MemoryThrottle;

    const RESUME: &str = "Jordan Lee | jordan.lee@example.com\n\
        Summary: Electrical engineering student targeting power electronics roles.\n\
        Education: B.S. Electrical Engineering, State University\n\
        Experience: Test intern\n\
        - Built a PCB test harness that cut board bring-up time 30%\n\
        Projects: buck converter on a custom PCB\n\
        Skills: Altium, MATLAB, oscilloscope, circuit analysis";

    struct FailingGenerator;

    #[async_trait]
    impl ReviewGenerator for FailingGenerator {
        async fn generate_html(
            &self,
            _kind: DocumentKind,
            _input: &DocumentInput,
        ) -> Result<String, AppError> {
            Err(AppError::Llm("upstream unavailable".into()))
        }
    }

    struct FixedGenerator;

    #[async_trait]
    impl ReviewGenerator for FixedGenerator {
        async fn generate_html(
            &self,
            kind: DocumentKind,
            _input: &DocumentInput,
        ) -> Result<String, AppError> {
            Ok(format!("<div class=\"review\"><h2>{}</h2></div>", kind.profile().title))
        }
    }

    fn state_with(max_requests: u32, generator: Option<Arc<dyn ReviewGenerator>>) -> AppState {
        AppState {
            config: Config::default(),
            throttle: Arc::new(MemoryThrottle::new(max_requests, Duration::from_secs(60))),
            generator,
        }
    }

    fn app() -> Router {
        build_router(state_with(100, None))
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn multipart(field: &str, content: &[u8]) -> Request<Body> {
        let boundary = "mentorboundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/extract/pdf")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "mentor-api");
    }

    #[tokio::test]
    async fn test_short_linkedin_text_rejected() {
        let req = post_json(
            "/api/v1/review/linkedin",
            json!({ "linkedinText": "Engineering student. Open to work." }).to_string(),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INPUT_TOO_SHORT");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("LinkedIn text is too short"));
    }

    #[tokio::test]
    async fn test_malformed_json_treated_as_empty_input() {
        let req = post_json("/api/v1/review/resume", "{\"resumeText\": ".to_string());
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INPUT_TOO_SHORT");
    }

    #[tokio::test]
    async fn test_unknown_format_names_the_field_not_the_length() {
        let req = post_json(
            "/api/v1/review/resume",
            json!({ "resumeText": RESUME, "format": "markdown" }).to_string(),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("format"));
        assert!(!message.contains("you pasted 0"));
    }

    #[tokio::test]
    async fn test_numeric_target_role_names_the_field_not_the_length() {
        let req = post_json(
            "/api/v1/review/linkedin",
            json!({ "linkedinText": RESUME, "targetRole": 42 }).to_string(),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("targetRole"));
    }

    #[tokio::test]
    async fn test_null_target_role_still_reviews() {
        let req = post_json(
            "/api/v1/review/resume",
            json!({ "resumeText": RESUME, "targetRole": null, "format": "json" }).to_string(),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["targetRole"].is_null());
    }

    #[tokio::test]
    async fn test_resume_html_review() {
        let req = post_json(
            "/api/v1/review/resume",
            json!({ "resumeText": RESUME, "targetRole": "Electrical Engineer" }).to_string(),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "heuristic");
        let html = body["html"].as_str().unwrap();
        assert!(html.starts_with("<div class=\"review\">"));
        assert!(html.contains("<h2>Resume Review</h2>"));
        assert!(body.get("overall").is_none());
    }

    #[tokio::test]
    async fn test_linkedin_json_review() {
        let req = post_json(
            "/api/v1/review/linkedin",
            json!({ "text": RESUME, "format": "json" }).to_string(),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "heuristic");
        assert_eq!(body["kind"], "linkedin");
        assert!(body.get("html").is_none());
        assert!(body["overall"].as_u64().unwrap() <= 100);
        assert!(body["scoreBreakdown"]["completeness"].is_number());
        assert_eq!(body["plan"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_throttle_returns_429() {
        let app = build_router(state_with(1, None));
        let body = json!({ "resumeText": RESUME }).to_string();

        let first = post_json("/api/v1/review/resume", body.clone());
        let (status, _) = send(app.clone(), first).await;
        assert_eq!(status, StatusCode::OK);

        let second = post_json("/api/v1/review/resume", body);
        let (status, body) = send(app, second).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], "RATE_LIMITED");
    }

    #[tokio::test]
    async fn test_generated_review_used_when_available() {
        let app = build_router(state_with(100, Some(Arc::new(FixedGenerator))));
        let req = post_json(
            "/api/v1/review/linkedin",
            json!({ "linkedinText": RESUME }).to_string(),
        );
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "llm");
        assert_eq!(
            body["html"],
            "<div class=\"review\"><h2>LinkedIn Profile Review</h2></div>"
        );
    }

    #[tokio::test]
    async fn test_generator_failure_falls_back_to_heuristic() {
        let app = build_router(state_with(100, Some(Arc::new(FailingGenerator))));
        let req = post_json(
            "/api/v1/review/resume",
            json!({ "resumeText": RESUME }).to_string(),
        );
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "heuristic");
        assert!(body["html"].as_str().unwrap().contains("Scorecard"));
    }

    #[tokio::test]
    async fn test_json_format_skips_generator() {
        let app = build_router(state_with(100, Some(Arc::new(FixedGenerator))));
        let req = post_json(
            "/api/v1/review/resume",
            json!({ "resumeText": RESUME, "format": "json" }).to_string(),
        );
        let (_, body) = send(app, req).await;
        assert_eq!(body["source"], "heuristic");
        assert_eq!(body["kind"], "resume");
    }

    #[tokio::test]
    async fn test_pdf_missing_file_rejected() {
        let (status, body) = send(app(), multipart("other", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Choose a PDF first.");
    }

    #[tokio::test]
    async fn test_pdf_non_pdf_bytes_rejected() {
        let (status, body) = send(app(), multipart("file", b"just some text")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }
}
