//! Cover-letter generation.
//!
//! Flow: requirement check → input-length check → fill the cover-letter
//! template → one completion call. The caller owns the session and writes
//! the returned text back; nothing here touches shared state.

use std::time::Instant;

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{CoverLetterPrompt, COVER_LETTER_TEMPLATE_VERSION};
use crate::llm_client::Completion;
use crate::models::session::{GenerationSettings, Session};

/// Minimum trimmed length, in characters, of both the CV text and the job description.
pub const MIN_INPUT_CHARS: usize = 50;

pub const CV_TOO_SHORT: &str = "CV content is too short or empty. Please upload a valid CV.";
pub const JOB_DESCRIPTION_TOO_SHORT: &str =
    "Job description is too short or empty. Please provide a detailed job description.";

/// Everything one generation call needs, copied out of the session so the
/// store lock is released before the LLM call starts.
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    pub cv_text: String,
    pub job_description: String,
    pub applicant_name: Option<String>,
    pub settings: GenerationSettings,
}

impl GenerationInputs {
    pub fn from_session(session: &Session) -> Self {
        GenerationInputs {
            cv_text: session.valid_cv_text().unwrap_or_default().to_string(),
            job_description: session.job_description.clone(),
            applicant_name: session.applicant_name().map(str::to_string),
            settings: session.settings,
        }
    }
}

/// Rejects the action with `Please provide: ...` when anything is missing.
pub fn ensure_requirements(missing: &[&str]) -> Result<(), AppError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Please provide: {}",
            missing.join(", ")
        )))
    }
}

/// Both inputs must carry at least `MIN_INPUT_CHARS` characters after trimming.
pub fn validate_inputs(cv_text: &str, job_description: &str) -> Result<(), AppError> {
    if cv_text.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(AppError::Validation(CV_TOO_SHORT.to_string()));
    }
    if job_description.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(AppError::Validation(JOB_DESCRIPTION_TOO_SHORT.to_string()));
    }
    Ok(())
}

/// Generates a cover letter. Upstream failures come back as `AppError::Llm`.
pub async fn generate_cover_letter(
    llm: &dyn Completion,
    inputs: &GenerationInputs,
) -> Result<String, AppError> {
    validate_inputs(&inputs.cv_text, &inputs.job_description)?;

    let prompt = CoverLetterPrompt {
        cv_content: &inputs.cv_text,
        job_description: &inputs.job_description,
        applicant_name: inputs.applicant_name.as_deref(),
        tone: inputs.settings.tone,
    }
    .render();

    info!(
        template = COVER_LETTER_TEMPLATE_VERSION,
        tone = inputs.settings.tone.label(),
        temperature = inputs.settings.temperature,
        prompt_chars = prompt.len(),
        name_known = inputs.applicant_name.is_some(),
        "generating cover letter"
    );

    let started = Instant::now();
    let letter = llm.complete(&prompt, inputs.settings.temperature).await?;

    info!(
        words = letter.split_whitespace().count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "cover letter generated"
    );
    Ok(letter.trim().to_string())
}
