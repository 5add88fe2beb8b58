use once_cell::sync::Lazy;
use regex::Regex;

/// Base used when there is no usable applicant name.
pub const DEFAULT_BASE: &str = "Cover_Letter";

fn disallowed_chars_regex() -> &'static Regex {
    static DISALLOWED: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[^\w\s-]").expect("Failed to create disallowed_chars_regex"));
    &DISALLOWED
}

fn separator_run_regex() -> &'static Regex {
    static SEPARATORS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[-\s]+").expect("Failed to create separator_run_regex"));
    &SEPARATORS
}

/// Derives the PDF download name from an applicant name.
///
/// Surrounding whitespace is trimmed first, so `" John "` gives
/// `John_Cover_Letter.pdf` rather than a leading underscore. Anything other than word characters, whitespace and hyphens is dropped,
/// then each hyphen/whitespace run becomes one underscore. Placeholder or
/// empty names yield `Cover_Letter.pdf`.
pub fn format_filename(applicant_name: &str) -> String {
    let stripped = disallowed_chars_regex().replace_all(applicant_name.trim(), "");
    let clean = separator_run_regex().replace_all(&stripped, "_");

    let base = match clean.to_lowercase().as_str() {
        "[your name]" | "your_name" | "" => DEFAULT_BASE.to_string(),
        _ => format!("{clean}_{DEFAULT_BASE}"),
    };
    format!("{base}.pdf")
}
