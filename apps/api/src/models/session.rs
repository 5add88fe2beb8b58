use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cv::name::{guess_signatory_name, NAME_PLACEHOLDER};
use crate::generation::tone::ToneDirective;
use crate::scoring::parser::MatchScoreResult;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const REQUIREMENT_API_KEY: &str = "API key";
pub const REQUIREMENT_CV: &str = "CV upload";
pub const REQUIREMENT_JOB_DESCRIPTION: &str = "job description";

/// A CV that made it through text extraction. `is_valid` records the
/// keyword heuristic; an invalid CV is kept for display but never used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvDocument {
    pub text: String,
    pub layout_text: String,
    pub is_valid: bool,
    pub suggested_name: Option<String>,
    pub source_filename: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub tone: ToneDirective,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            tone: ToneDirective::default(),
        }
    }
}

/// Current cover-letter text. Edits overwrite it; there is no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetterDraft {
    pub text: String,
    pub tone: ToneDirective,
    pub temperature: f32,
    pub generated_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub cv: Option<CvDocument>,
    pub job_description: String,
    pub settings: GenerationSettings,
    pub applicant_name_override: Option<String>,
    pub cover_letter: Option<CoverLetterDraft>,
    pub match_score: Option<MatchScoreResult>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            cv: None,
            job_description: String::new(),
            settings: GenerationSettings::default(),
            applicant_name_override: None,
            cover_letter: None,
            match_score: None,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Text of the CV if one has been accepted.
    pub fn valid_cv_text(&self) -> Option<&str> {
        self.cv
            .as_ref()
            .filter(|cv| cv.is_valid)
            .map(|cv| cv.text.as_str())
    }

    /// Name to put in the prompt: the user's override, then the CV suggestion.
    pub fn applicant_name(&self) -> Option<&str> {
        self.applicant_name_override.as_deref().or_else(|| {
            self.cv
                .as_ref()
                .filter(|cv| cv.is_valid)
                .and_then(|cv| cv.suggested_name.as_deref())
        })
    }

    /// Name for the PDF title and filename. Also tries the top of the letter
    /// before falling back to the placeholder.
    pub fn document_name(&self) -> String {
        if let Some(name) = self.applicant_name() {
            return name.to_string();
        }
        self.cover_letter
            .as_ref()
            .and_then(|draft| guess_signatory_name(&draft.text))
            .unwrap_or_else(|| NAME_PLACEHOLDER.to_string())
    }

    /// Inputs still missing before an LLM-backed action can run, in display order.
    pub fn missing_requirements(&self, has_api_key: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !has_api_key {
            missing.push(REQUIREMENT_API_KEY);
        }
        if self.valid_cv_text().map_or(true, |t| t.trim().is_empty()) {
            missing.push(REQUIREMENT_CV);
        }
        if self.job_description.trim().is_empty() {
            missing.push(REQUIREMENT_JOB_DESCRIPTION);
        }
        missing
    }
}

/// Whitespace-separated word count, as shown next to text inputs.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv(name: Option<&str>, is_valid: bool) -> CvDocument {
        CvDocument {
            text: "Jane Doe experience education skills".to_string(),
            layout_text: "Jane Doe\nexperience education skills".to_string(),
            is_valid,
            suggested_name: name.map(str::to_string),
            source_filename: Some("cv.pdf".to_string()),
        }
    }

    fn draft(text: &str) -> CoverLetterDraft {
        CoverLetterDraft {
            text: text.to_string(),
            tone: ToneDirective::default(),
            temperature: DEFAULT_TEMPERATURE,
            generated_at: Utc::now(),
            edited_at: None,
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let s = Session::new(Uuid::new_v4(), Utc::now());
        assert_eq!(s.settings.temperature, 0.7);
        assert_eq!(s.settings.tone, ToneDirective::ProfessionalConfident);
        assert!(s.cv.is_none() && s.cover_letter.is_none() && s.match_score.is_none());
    }

    #[test]
    fn test_missing_requirements_lists_all_in_order() {
        let s = Session::new(Uuid::new_v4(), Utc::now());
        assert_eq!(
            s.missing_requirements(false),
            vec!["API key", "CV upload", "job description"]
        );
    }

    #[test]
    fn test_invalid_cv_counts_as_missing() {
        let mut s = Session::new(Uuid::new_v4(), Utc::now());
        s.cv = Some(cv(Some("Jane Doe"), false));
        s.job_description = "Rust engineer".to_string();
        assert_eq!(s.missing_requirements(true), vec!["CV upload"]);
        assert_eq!(s.applicant_name(), None);

        s.cv = Some(cv(Some("Jane Doe"), true));
        assert!(s.missing_requirements(true).is_empty());
    }

    #[test]
    fn test_override_beats_cv_suggestion() {
        let mut s = Session::new(Uuid::new_v4(), Utc::now());
        s.cv = Some(cv(Some("Software Engineer"), true));
        assert_eq!(s.applicant_name(), Some("Software Engineer"));
        s.applicant_name_override = Some("Jane Doe".to_string());
        assert_eq!(s.applicant_name(), Some("Jane Doe"));
        assert_eq!(s.document_name(), "Jane Doe");
    }

    #[test]
    fn test_document_name_falls_back_to_letter_then_placeholder() {
        let mut s = Session::new(Uuid::new_v4(), Utc::now());
        assert_eq!(s.document_name(), NAME_PLACEHOLDER);

        s.cover_letter = Some(draft("Dear Hiring Manager,\n\nI am writing to apply for the role."));
        assert_eq!(s.document_name(), NAME_PLACEHOLDER);

        s.cover_letter = Some(draft("Jane Doe\n42 High Street, Springfield\n\nDear Hiring Manager,"));
        assert_eq!(s.document_name(), "Jane Doe");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
    }
}
