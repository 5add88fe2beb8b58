//! Axum route handler for CV upload.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cv::extract::{extract_text, ExtractedText};
use crate::cv::name::extract_name;
use crate::cv::validation::{is_valid_cv, matched_keywords};
use crate::errors::AppError;
use crate::models::session::CvDocument;
use crate::state::AppState;

/// Multipart field carrying the PDF.
pub const FILE_FIELD: &str = "file";
pub const PREVIEW_CHARS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CvSummary {
    pub preview: String,
    pub char_count: usize,
    pub is_valid: bool,
    pub matched_keywords: Vec<&'static str>,
    pub suggested_name: Option<String>,
    pub source_filename: Option<String>,
}

impl From<&CvDocument> for CvSummary {
    fn from(cv: &CvDocument) -> Self {
        CvSummary {
            preview: preview(&cv.text),
            char_count: cv.text.chars().count(),
            is_valid: cv.is_valid,
            matched_keywords: matched_keywords(&cv.text),
            suggested_name: cv.suggested_name.clone(),
            source_filename: cv.source_filename.clone(),
        }
    }
}

/// First `PREVIEW_CHARS` characters, with `...` appended when cut.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Runs the validity check and name heuristic over freshly extracted text.
pub fn build_cv_document(extracted: ExtractedText, source_filename: Option<String>) -> CvDocument {
    let is_valid = is_valid_cv(&extracted.text);
    let suggested_name = extract_name(&extracted.layout_text);
    CvDocument {
        text: extracted.text,
        layout_text: extracted.layout_text,
        is_valid,
        suggested_name,
        source_filename,
    }
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(Option<String>, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        return Ok((filename, bytes));
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}' with the CV PDF"
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/cv
///
/// Replaces the session's CV. On extraction failure the stored CV is cleared;
/// a CV that fails the plausibility check is kept but marked invalid, and the
/// request still fails so the user uploads a better file.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<CvSummary>, AppError> {
    state.sessions.snapshot(session_id).await?;

    let (filename, bytes) = read_file_field(&mut multipart).await?;
    let upload_bytes = bytes.len();

    let extracted = match extract_text(bytes).await {
        Ok(extracted) => extracted,
        Err(e) => {
            warn!(session_id = %session_id, upload_bytes, "CV extraction failed: {e}");
            state.sessions.update(session_id, |s| s.cv = None).await?;
            return Err(e.into());
        }
    };

    let cv = build_cv_document(extracted, filename);
    let summary = CvSummary::from(&cv);
    let is_valid = cv.is_valid;
    state.sessions.update(session_id, |s| s.cv = Some(cv)).await?;

    if !is_valid {
        warn!(
            session_id = %session_id,
            chars = summary.char_count,
            keywords = summary.matched_keywords.len(),
            "uploaded file does not look like a CV"
        );
        return Err(AppError::InvalidCv);
    }

    info!(
        session_id = %session_id,
        chars = summary.char_count,
        name_found = summary.suggested_name.is_some(),
        "CV accepted"
    );
    Ok(Json(summary))
}
