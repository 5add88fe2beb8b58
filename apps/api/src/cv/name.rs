//! Best-effort applicant name heuristics.
//!
//! Both functions return a *suggestion*. Callers keep the user's override
//! ahead of them and fall back to `NAME_PLACEHOLDER` when nothing is found.

/// Literal used wherever no applicant name is known.
pub const NAME_PLACEHOLDER: &str = "[Your Name]";

const CV_HEADER_LINES: &[&str] = &["cv", "resume", "curriculum vitae"];
const CONTACT_MARKERS: &[&str] = &[
    "phone",
    "email",
    "address",
    "linkedin",
    "experience",
    "education",
];

const NAME_SCAN_LINES: usize = 5;
const LETTER_SCAN_LINES: usize = 3;
const SALUTATION_PREFIXES: &[&str] = &["dear", "to whom", "hiring"];
const SIGN_OFF_WORDS: &[&str] = &["sincerely", "regards", "yours"];

fn has_name_word_count(line: &str) -> bool {
    (2..=4).contains(&line.split_whitespace().count())
}

/// Picks the applicant's name out of the first lines of CV text.
///
/// Blank lines still count toward the scan window. A job title can slip
/// through; that is accepted.
pub fn extract_name(cv_text: &str) -> Option<String> {
    cv_text
        .split('\n')
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !CV_HEADER_LINES.contains(&line.to_lowercase().as_str()))
        .find(|line| {
            let lower = line.to_lowercase();
            has_name_word_count(line) && !CONTACT_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(str::to_string)
}

/// Guesses a name from the top of a generated or edited letter, where the
/// model usually puts the sender block.
pub fn guess_signatory_name(letter: &str) -> Option<String> {
    letter
        .split('\n')
        .take(LETTER_SCAN_LINES)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let lower = line.to_lowercase();
            !SALUTATION_PREFIXES.iter().any(|p| lower.starts_with(p))
        })
        .find(|line| {
            has_name_word_count(line)
                && !line
                    .split_whitespace()
                    .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
                    .any(|w| SIGN_OFF_WORDS.contains(&w.as_str()))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_first_line() {
        let cv = "John Smith\nSoftware Engineer\nPhone: 555-1234\nExperience...";
        assert_eq!(extract_name(cv), Some("John Smith".to_string()));
    }

    #[test]
    fn test_skips_cv_header_lines() {
        let cv = "Curriculum Vitae\nRESUME\nMaria de la Cruz\nData Analyst";
        assert_eq!(extract_name(cv), Some("Maria de la Cruz".to_string()));
    }

    #[test]
    fn test_skips_contact_lines() {
        let cv = "Email: jane@example.com\nPhone +44 1234\nJane Doe\n";
        assert_eq!(extract_name(cv), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_contact_marker_is_substring_match() {
        // "Educational Consultant" contains "education".
        let cv = "Educational Consultant\nAlex Kim";
        assert_eq!(extract_name(cv), Some("Alex Kim".to_string()));
    }

    #[test]
    fn test_single_word_and_long_lines_rejected() {
        let cv = "Madonna\nSenior Staff Software Engineer II\nA. B.";
        assert_eq!(extract_name(cv), Some("A. B.".to_string()));
    }

    #[test]
    fn test_never_looks_past_line_five() {
        let cv = "CV\n\n\nResume\n\nJohn Smith";
        assert_eq!(extract_name(cv), None);
    }

    #[test]
    fn test_fifth_line_is_still_scanned() {
        let cv = "CV\n\n\nResume\nJohn Smith";
        assert_eq!(extract_name(cv), Some("John Smith".to_string()));
    }

    #[test]
    fn test_job_title_may_be_picked() {
        let cv = "Software Engineer\nJohn Smith";
        assert_eq!(extract_name(cv), Some("Software Engineer".to_string()));
    }

    #[test]
    fn test_empty_text_has_no_name() {
        assert_eq!(extract_name(""), None);
    }

    #[test]
    fn test_crlf_lines_trimmed() {
        assert_eq!(
            extract_name("\r\nPriya Natarajan\r\n"),
            Some("Priya Natarajan".to_string())
        );
    }

    #[test]
    fn test_signatory_from_sender_block() {
        let letter = "Jane A. Doe\n12 High Street\n\nDear Hiring Manager,";
        assert_eq!(guess_signatory_name(letter), Some("Jane A. Doe".to_string()));
    }

    #[test]
    fn test_signatory_skips_salutation() {
        let letter = "Dear Ms Patel,\nHiring Team Lead\nI am writing to apply for the role.";
        assert_eq!(guess_signatory_name(letter), None);
    }

    #[test]
    fn test_signatory_rejects_sign_off() {
        let letter = "Yours sincerely,\nKind regards,\nSam Lee Jones";
        assert_eq!(guess_signatory_name(letter), Some("Sam Lee Jones".to_string()));
    }

    #[test]
    fn test_signatory_none_for_prose() {
        let letter = "I am excited to apply for the Backend Engineer position at Acme.";
        assert_eq!(guess_signatory_name(letter), None);
    }
}
