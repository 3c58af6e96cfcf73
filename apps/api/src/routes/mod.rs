pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

/// Largest accepted resume upload.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/extract-skills",
            post(handlers::handle_extract_skills),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/results", get(handlers::handle_list_results))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::analysis::LexiconAnalyzer;
    use crate::matching::extractor::SkillExtractor;
    use crate::matching::offers::PgJobOfferSource;
    use crate::matching::pipeline::MatchingPipeline;
    use crate::matching::recognizer::TesseractRecognizer;

    const BOUNDARY: &str = "resume-upload-boundary";

    fn test_state() -> AppState {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/jobfinder_test")
            .unwrap();
        let config = Config {
            database_url: "postgres://localhost/jobfinder_test".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            upload_dir: std::env::temp_dir().display().to_string(),
            ocr_gpu: false,
            ocr_language: "eng".to_string(),
            tesseract_cmd: "tesseract".to_string(),
            offer_limit: 10,
            extra_technologies: vec![],
        };
        let extractor = SkillExtractor::new(Arc::new(LexiconAnalyzer::new())).unwrap();
        let pipeline = MatchingPipeline::new(
            Arc::new(TesseractRecognizer::new("tesseract", "eng", false)),
            Arc::new(extractor),
            Arc::new(PgJobOfferSource::new(db.clone())),
            config.offer_limit,
        );
        AppState {
            db,
            config,
            pipeline: Arc::new(pipeline),
        }
    }

    fn multipart_request(uri: &str, field: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn error_message(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        json["error"]["message"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_file_field_rejected() {
        let request = multipart_request("/api/v1/extract-skills", "attachment", "cv.png", "x");
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await, "No file part");
    }

    #[tokio::test]
    async fn test_empty_filename_rejected() {
        let request = multipart_request("/api/v1/match", "file", "", "x");
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await, "No selected file");
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected() {
        let request = multipart_request("/api/v1/match", "file", "resume.docx", "x");
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await, "File type not allowed");
    }
}
