//! Axum route handlers for the two cover-letter downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use anyhow::Context;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::Session;
use crate::render::filename::format_filename;
use crate::render::pdf::render_cover_letter_pdf;
use crate::state::AppState;

pub const TEXT_FILENAME: &str = "cover_letter.txt";

fn letter_text(session: &Session) -> Result<String, AppError> {
    session
        .cover_letter
        .as_ref()
        .map(|draft| draft.text.clone())
        .ok_or_else(|| {
            AppError::NotFound("No cover letter has been generated for this session".to_string())
        })
}

/// `Content-Disposition` for a download. Non-ASCII names get an RFC 5987
/// `filename*` next to an ASCII fallback.
pub fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{filename}\"");
    }
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect();
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// GET /api/v1/sessions/:id/cover-letter.txt
///
/// The body is exactly the stored draft text.
pub async fn handle_download_text(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.snapshot(session_id).await?;
    let text = letter_text(&session)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(TEXT_FILENAME)),
        ],
        text,
    ))
}

/// GET /api/v1/sessions/:id/cover-letter.pdf
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.snapshot(session_id).await?;
    let text = letter_text(&session)?;
    let name = session.document_name();
    let filename = format_filename(&name);

    let config = state.page_config.clone();
    let pdf = tokio::task::spawn_blocking(move || render_cover_letter_pdf(&text, &name, &config))
        .await
        .context("PDF render task failed")??;
    info!(session_id = %session_id, bytes = pdf.len(), filename = %filename, "cover letter PDF rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        pdf,
    ))
}
