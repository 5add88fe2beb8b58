//! Axum route handlers for tones and the cover-letter draft.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{ensure_requirements, generate_cover_letter, GenerationInputs};
use crate::generation::tone::{tone_options, ToneDirective, ToneOption};
use crate::models::session::{word_count, CoverLetterDraft};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CoverLetterView {
    pub text: String,
    pub word_count: usize,
    pub tone: ToneDirective,
    pub temperature: f32,
    pub generated_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<&CoverLetterDraft> for CoverLetterView {
    fn from(draft: &CoverLetterDraft) -> Self {
        CoverLetterView {
            text: draft.text.clone(),
            word_count: word_count(&draft.text),
            tone: draft.tone,
            temperature: draft.temperature,
            generated_at: draft.generated_at,
            edited_at: draft.edited_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditCoverLetterRequest {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tones
pub async fn handle_list_tones() -> Json<Vec<ToneOption>> {
    Json(tone_options())
}

/// POST /api/v1/sessions/:id/cover-letter
///
/// Generates a fresh draft from the session's CV, job description and
/// settings. On failure the previous draft, if any, is left as it was.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CoverLetterView>, AppError> {
    let session = state.sessions.snapshot(session_id).await?;
    ensure_requirements(&session.missing_requirements(state.has_api_key()))?;
    let llm = state
        .llm
        .clone()
        .ok_or_else(|| AppError::Validation("Please provide: API key".to_string()))?;

    let inputs = GenerationInputs::from_session(&session);
    let text = generate_cover_letter(llm.as_ref(), &inputs).await?;

    let draft = CoverLetterDraft {
        text,
        tone: inputs.settings.tone,
        temperature: inputs.settings.temperature,
        generated_at: Utc::now(),
        edited_at: None,
    };
    let view = CoverLetterView::from(&draft);
    state
        .sessions
        .update(session_id, |s| s.cover_letter = Some(draft))
        .await?;

    info!(session_id = %session_id, words = view.word_count, "cover letter stored");
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/cover-letter
///
/// Replaces the draft text with the user's edit. There is no history.
pub async fn handle_edit_cover_letter(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EditCoverLetterRequest>,
) -> Result<Json<CoverLetterView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |s| {
            let draft = s.cover_letter.as_mut()?;
            draft.text = request.text;
            draft.edited_at = Some(Utc::now());
            Some(CoverLetterView::from(&*draft))
        })
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No cover letter has been generated for this session".to_string())
        })?;
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::llm_client::testing::CannedCompletion;
    use crate::llm_client::Completion;
    use crate::models::session::CvDocument;
    use crate::routes::test_support::{create_session, empty_request, json_request, send, TestApp};

    const CV_TEXT: &str = "Jane Doe. Six years of experience building payment APIs in Rust. Education: BSc Computer Science. Skills: Rust, SQL.";
    const JD: &str = "Acme is hiring a backend engineer to own our billing platform, written in Rust and Postgres.";
    const LETTER: &str = "Dear Hiring Manager,\n\nI am excited to apply for the Backend Engineer role.\n\nSincerely,\nJane Doe";

    async fn ready_session(app: &TestApp) -> uuid::Uuid {
        let id = create_session(&app.router).await;
        app.state
            .sessions
            .update(id, |s| {
                s.cv = Some(CvDocument {
                    text: CV_TEXT.to_string(),
                    layout_text: CV_TEXT.to_string(),
                    is_valid: true,
                    suggested_name: Some("Jane Doe".to_string()),
                    source_filename: None,
                });
                s.job_description = JD.to_string();
            })
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_generate_stores_draft() {
        let llm = CannedCompletion::replying(LETTER);
        let app = TestApp::new(Some(llm.clone() as Arc<dyn Completion>));
        let id = ready_session(&app).await;

        let (status, body) = send(
            &app.router,
            empty_request("POST", &format!("/api/v1/sessions/{id}/cover-letter")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], LETTER);
        assert_eq!(body["word_count"], 16);
        assert_eq!(body["tone"], "professional_confident");

        let (prompt, temperature) = &llm.calls()[0];
        assert!(prompt.contains("Applicant Name (if identified): Jane Doe"));
        assert!((temperature - 0.7).abs() < 1e-6);

        let session = app.state.sessions.snapshot(id).await.unwrap();
        assert_eq!(session.cover_letter.unwrap().text, LETTER);
    }

    #[tokio::test]
    async fn test_generate_lists_missing_requirements() {
        let app = TestApp::new(None);
        let id = create_session(&app.router).await;
        let (status, body) = send(
            &app.router,
            empty_request("POST", &format!("/api/v1/sessions/{id}/cover-letter")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Please provide: API key, CV upload, job description"
        );
    }

    #[tokio::test]
    async fn test_generate_rejects_short_job_description() {
        let llm = CannedCompletion::replying(LETTER);
        let app = TestApp::new(Some(llm.clone() as Arc<dyn Completion>));
        let id = ready_session(&app).await;
        app.state
            .sessions
            .update(id, |s| s.job_description = "Rust dev".to_string())
            .await
            .unwrap();

        let (status, body) = send(
            &app.router,
            empty_request("POST", &format!("/api/v1/sessions/{id}/cover-letter")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Job description is too short or empty. Please provide a detailed job description."
        );
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_previous_draft() {
        let app = TestApp::new(Some(CannedCompletion::failing() as Arc<dyn Completion>));
        let id = ready_session(&app).await;
        app.state
            .sessions
            .update(id, |s| {
                s.cover_letter = Some(crate::models::session::CoverLetterDraft {
                    text: "previous".to_string(),
                    tone: Default::default(),
                    temperature: 0.7,
                    generated_at: chrono::Utc::now(),
                    edited_at: None,
                })
            })
            .await
            .unwrap();

        let (status, body) = send(
            &app.router,
            empty_request("POST", &format!("/api/v1/sessions/{id}/cover-letter")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("You exceeded your current quota"));

        let session = app.state.sessions.snapshot(id).await.unwrap();
        assert_eq!(session.cover_letter.unwrap().text, "previous");
    }

    #[tokio::test]
    async fn test_edit_overwrites_draft() {
        let llm = CannedCompletion::replying(LETTER);
        let app = TestApp::new(Some(llm as Arc<dyn Completion>));
        let id = ready_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/cover-letter");

        let (status, _) = send(&app.router, json_request("PUT", &uri, json!({"text": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app.router, empty_request("POST", &uri)).await;
        let (status, body) = send(
            &app.router,
            json_request("PUT", &uri, json!({"text": "Edited letter.\n\nThanks"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Edited letter.\n\nThanks");
        assert_eq!(body["word_count"], 3);
        assert!(body["edited_at"].is_string());
    }
}
