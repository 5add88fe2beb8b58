//! PDF text extraction: a thin wrapper over the `pdf-extract` crate.
//!
//! Extraction is CPU-bound; the async entry point runs it under
//! `tokio::task::spawn_blocking`. The parser is known to panic on some
//! malformed inputs, so a panic in the blocking task is reported as a normal
//! extraction failure rather than tearing down the request.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file is not a PDF")]
    NotPdf,

    #[error("could not read PDF: {0}")]
    Parse(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Text pulled out of a PDF, in two shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    /// All pages in document order, every whitespace run collapsed to one space.
    pub text: String,
    /// Page text as the parser laid it out, line breaks intact.
    pub layout_text: String,
}

/// Returns true if the bytes start with the PDF magic header.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF-")
}

/// Collapses every whitespace run (newlines included) to a single space and trims.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts text from a PDF stored fully in memory.
///
/// An empty result after normalisation is an error: callers must never treat
/// it as an empty CV.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    if !is_pdf(bytes) {
        return Err(ExtractError::NotPdf);
    }

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let text = normalize_whitespace(&raw);
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }

    let layout_text = raw
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_start_matches('\n')
        .to_string();

    debug!(chars = text.len(), "extracted CV text");
    Ok(ExtractedText { text, layout_text })
}

/// Runs `extract_text_from_pdf` on the blocking pool.
pub async fn extract_text(bytes: Bytes) -> Result<ExtractedText, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
        .await
        .map_err(|e| {
            let reason = if e.is_panic() {
                "the PDF parser crashed on this file"
            } else {
                "extraction was cancelled"
            };
            ExtractError::Parse(reason.to_string())
        })?
}
