//! Axum route handler for CV/job match scoring.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::ensure_requirements;
use crate::scoring::parser::MatchScoreResult;
use crate::scoring::prompts::{ScoringPrompt, SCORING_TEMPLATE_VERSION};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScoreView {
    #[serde(flatten)]
    pub result: MatchScoreResult,
    pub verdict: &'static str,
}

impl From<&MatchScoreResult> for ScoreView {
    fn from(result: &MatchScoreResult) -> Self {
        ScoreView {
            verdict: result.verdict(),
            result: result.clone(),
        }
    }
}

/// POST /api/v1/sessions/:id/score
///
/// Scores the session's CV against its job description. The new result
/// replaces any earlier one; on failure the earlier one stays.
pub async fn handle_score_cv(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ScoreView>, AppError> {
    let session = state.sessions.snapshot(session_id).await?;
    ensure_requirements(&session.missing_requirements(state.has_api_key()))?;
    let llm = state
        .llm
        .clone()
        .ok_or_else(|| AppError::Validation("Please provide: API key".to_string()))?;

    let prompt = ScoringPrompt {
        cv_content: session.valid_cv_text().unwrap_or_default(),
        job_description: &session.job_description,
    }
    .render();

    info!(
        session_id = %session_id,
        template = SCORING_TEMPLATE_VERSION,
        temperature = session.settings.temperature,
        prompt_chars = prompt.len(),
        "scoring CV against job description"
    );

    let started = Instant::now();
    let raw = llm.complete(&prompt, session.settings.temperature).await?;
    let result = MatchScoreResult::parse(&raw);

    info!(
        session_id = %session_id,
        score = result.score,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "match score stored"
    );

    let view = ScoreView::from(&result);
    state
        .sessions
        .update(session_id, |s| s.match_score = Some(result))
        .await?;
    Ok(Json(view))
}
