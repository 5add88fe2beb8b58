//! Axum route handlers for session lifecycle and the plain session inputs
//! (settings, job description, applicant name).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cv::handlers::CvSummary;
use crate::errors::AppError;
use crate::generation::handlers::CoverLetterView;
use crate::generation::tone::ToneDirective;
use crate::models::session::{word_count, GenerationSettings, Session};
use crate::scoring::handlers::ScoreView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub settings: GenerationSettings,
    pub cv: Option<CvSummary>,
    pub job_description: String,
    pub job_description_word_count: usize,
    /// Name the PDF download will use right now.
    pub applicant_name: String,
    pub applicant_name_override: Option<String>,
    pub cover_letter: Option<CoverLetterView>,
    pub match_score: Option<ScoreView>,
    pub missing_requirements: Vec<&'static str>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionView {
    pub fn new(session: &Session, has_api_key: bool) -> Self {
        SessionView {
            id: session.id,
            settings: session.settings,
            cv: session.cv.as_ref().map(CvSummary::from),
            job_description: session.job_description.clone(),
            job_description_word_count: word_count(&session.job_description),
            applicant_name: session.document_name(),
            applicant_name_override: session.applicant_name_override.clone(),
            cover_letter: session.cover_letter.as_ref().map(CoverLetterView::from),
            match_score: session.match_score.as_ref().map(ScoreView::from),
            missing_requirements: session.missing_requirements(has_api_key),
            created_at: session.created_at,
            last_active_at: session.last_active_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub temperature: Option<f32>,
    pub tone: Option<ToneDirective>,
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub word_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ApplicantNameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantNameResponse {
    pub applicant_name: String,
    pub is_override: bool,
}

fn validate_temperature(temperature: f32) -> Result<f32, AppError> {
    if temperature.is_finite() && (0.0..=1.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(AppError::Validation(format!(
            "temperature must be between 0.0 and 1.0, got {temperature}"
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionView::new(&session, state.has_api_key())),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.snapshot(session_id).await?;
    Ok(Json(SessionView::new(&session, state.has_api_key())))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/settings
///
/// Fields left out of the body keep their current value.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SettingsRequest>,
) -> Result<Json<GenerationSettings>, AppError> {
    let temperature = request.temperature.map(validate_temperature).transpose()?;

    let settings = state
        .sessions
        .update(session_id, |s| {
            if let Some(t) = temperature {
                s.settings.temperature = t;
            }
            if let Some(tone) = request.tone {
                s.settings.tone = tone;
            }
            s.settings
        })
        .await?;

    debug!(session_id = %session_id, temperature = settings.temperature, tone = settings.tone.label(), "settings updated");
    Ok(Json(settings))
}

/// PUT /api/v1/sessions/:id/job-description
pub async fn handle_set_job_description(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    let count = word_count(&request.job_description);
    state
        .sessions
        .update(session_id, |s| s.job_description = request.job_description)
        .await?;
    Ok(Json(JobDescriptionResponse { word_count: count }))
}

/// PUT /api/v1/sessions/:id/applicant-name
///
/// A missing or blank name clears the override.
pub async fn handle_set_applicant_name(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ApplicantNameRequest>,
) -> Result<Json<ApplicantNameResponse>, AppError> {
    let name = request
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let response = state
        .sessions
        .update(session_id, |s| {
            s.applicant_name_override = name;
            ApplicantNameResponse {
                applicant_name: s.document_name(),
                is_override: s.applicant_name_override.is_some(),
            }
        })
        .await?;
    Ok(Json(response))
}
