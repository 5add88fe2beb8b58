pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::cv::handlers as cv;
use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::scoring::handlers as scoring;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tones", get(generation::handle_list_tones))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/settings",
            put(session::handle_update_settings),
        )
        .route(
            "/api/v1/sessions/:id/job-description",
            put(session::handle_set_job_description),
        )
        .route(
            "/api/v1/sessions/:id/applicant-name",
            put(session::handle_set_applicant_name),
        )
        // CV intake
        .route(
            "/api/v1/sessions/:id/cv",
            post(cv::handle_upload_cv).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // LLM-backed actions
        .route("/api/v1/sessions/:id/score", post(scoring::handle_score_cv))
        .route(
            "/api/v1/sessions/:id/cover-letter",
            post(generation::handle_generate_cover_letter).put(generation::handle_edit_cover_letter),
        )
        // Downloads
        .route(
            "/api/v1/sessions/:id/cover-letter.txt",
            get(render::handle_download_text),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter.pdf",
            get(render::handle_download_pdf),
        )
        .with_state(state)
}

/// In-process request helpers shared by the handler tests.
#[cfg(test)]
pub mod test_support {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body, Bytes},
        http::{HeaderMap, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::build_router;
    use crate::llm_client::Completion;
    use crate::state::{testing::test_state, AppState};

    pub struct TestApp {
        pub router: Router,
        pub state: AppState,
    }

    impl TestApp {
        pub fn new(llm: Option<Arc<dyn Completion>>) -> Self {
            let state = test_state(llm);
            Self {
                router: build_router(state.clone()),
                state,
            }
        }
    }

    pub async fn send_raw(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body)
    }

    /// Sends a request and decodes the body as JSON (`Null` when empty).
    pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = send_raw(router, request).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
        };
        (status, json)
    }

    pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn create_session(router: &Router) -> Uuid {
        let (status, body) = send(router, empty_request("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().parse().unwrap()
    }
}
