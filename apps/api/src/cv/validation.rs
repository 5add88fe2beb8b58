//! CV plausibility gate: a length floor plus a keyword vocabulary check.
//!
//! Heuristic only. False positives and negatives are expected.

/// Minimum trimmed length for text to be considered a CV.
pub const MIN_CV_CHARS: usize = 100;

/// Distinct vocabulary hits needed to accept the text.
pub const MIN_KEYWORD_HITS: usize = 3;

const CV_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work",
    "employment",
    "degree",
    "university",
    "college",
    "certificate",
    "qualification",
    "project",
    "responsibility",
    "achievement",
    "contact",
    "email",
];

/// Returns the vocabulary terms present in `text` (case-insensitive substring match).
pub fn matched_keywords(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    CV_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lower.contains(kw))
        .collect()
}

pub fn is_valid_cv(text: &str) -> bool {
    if text.trim().chars().count() < MIN_CV_CHARS {
        return false;
    }
    matched_keywords(text).len() >= MIN_KEYWORD_HITS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_to(text: &str, len: usize) -> String {
        let mut s = text.to_string();
        while s.chars().count() < len {
            s.push_str(" lorem");
        }
        s
    }

    #[test]
    fn test_short_text_always_rejected() {
        // All 15 keywords but still under the floor once trimmed.
        let dense = "experience education skills work";
        assert!(dense.len() < MIN_CV_CHARS);
        assert!(!is_valid_cv(dense));
        assert!(!is_valid_cv(""));
        assert!(!is_valid_cv(&" ".repeat(500)));
    }

    #[test]
    fn test_padding_whitespace_does_not_count_toward_length() {
        let text = format!("   {}   ", "experience education skills".to_string() + &"\n".repeat(200));
        assert!(!is_valid_cv(&text));
    }

    #[test]
    fn test_three_keywords_accepted() {
        let text = pad_to("Experience at Acme. Education: BSc. Skills: Rust.", 120);
        assert!(is_valid_cv(&text));
    }

    #[test]
    fn test_two_keywords_rejected() {
        let text = pad_to("Experience at Acme. Skills: Rust.", 150);
        assert_eq!(matched_keywords(&text).len(), 2);
        assert!(!is_valid_cv(&text));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let text = pad_to("EXPERIENCE — UNIVERSITY — EMAIL me", 120);
        assert_eq!(matched_keywords(&text), vec!["experience", "university", "email"]);
        assert!(is_valid_cv(&text));
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let text = pad_to("skills skills skills skills email", 140);
        assert_eq!(matched_keywords(&text).len(), 2);
        assert!(!is_valid_cv(&text));
    }

    #[test]
    fn test_substring_hits_count() {
        // "projects" contains "project", "worked" contains "work".
        let text = pad_to("Led projects; worked closely; contact via phone", 120);
        assert!(is_valid_cv(&text));
    }

    #[test]
    fn test_length_boundary_table() {
        let base = "experience education skills ";
        for (len, expected) in [(99usize, false), (100, true), (250, true)] {
            let mut text = base.to_string();
            while text.chars().count() < len {
                text.push('x');
            }
            assert_eq!(is_valid_cv(&text), expected, "length {len}");
        }
    }
}
