//! Match-score reply parser.
//!
//! The model is asked for five line-prefixed sections but nothing forces it
//! to comply, so this parser is total: any input yields a record. Parsing is
//! split in two steps:
//!
//! 1. `parse_sections`: a pure scan that reports only what was actually
//!    found (every field optional).
//! 2. `MatchScoreResult::from(sections)`: fills the display defaults.
//!
//! Algorithm (`parse_sections`):
//! - Walk the reply line by line with a cursor naming the current section.
//! - A line starting with `SCORE:`, `ANALYSIS:`, `STRENGTHS:`, `GAPS:` or
//!   `RECOMMENDATIONS:` moves the cursor and seeds that section with the
//!   trimmed remainder of the line (a repeated prefix replaces the earlier value).
//! - Other non-empty lines are space-joined onto the cursor's section.
//!   Lines before the first prefix, and lines under `SCORE:`, are dropped.
//! - The score is the first ASCII digit run in the `SCORE:` remainder, clamped to 1..=5.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
pub const DEFAULT_SCORE: u8 = 3;
pub const STAR: &str = "⭐";

pub const DEFAULT_ANALYSIS: &str = "Analysis not available";
pub const DEFAULT_DETAIL: &str = "Not specified";

pub const SECTION_PREFIXES: [&str; 5] = ["SCORE:", "ANALYSIS:", "STRENGTHS:", "GAPS:", "RECOMMENDATIONS:"];

fn digit_run_regex() -> &'static Regex {
    static DIGITS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[0-9]+").expect("Failed to create digit_run_regex"));
    &DIGITS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Score,
    Analysis,
    Strengths,
    Gaps,
    Recommendations,
}

impl Section {
    fn from_line(line: &str) -> Option<(Section, &str)> {
        const SECTIONS: [Section; 5] = [
            Section::Score,
            Section::Analysis,
            Section::Strengths,
            Section::Gaps,
            Section::Recommendations,
        ];
        SECTION_PREFIXES
            .iter()
            .zip(SECTIONS)
            .find_map(|(prefix, section)| line.strip_prefix(prefix).map(|rest| (section, rest.trim())))
    }
}

/// What the scan actually found. `None` means the section never appeared
/// (or, for `score`, that no digits followed `SCORE:`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSections {
    pub score: Option<u8>,
    pub analysis: Option<String>,
    pub strengths: Option<String>,
    pub gaps: Option<String>,
    pub recommendations: Option<String>,
}

impl ScoreSections {
    fn slot_mut(&mut self, section: Section) -> Option<&mut Option<String>> {
        match section {
            Section::Score => None,
            Section::Analysis => Some(&mut self.analysis),
            Section::Strengths => Some(&mut self.strengths),
            Section::Gaps => Some(&mut self.gaps),
            Section::Recommendations => Some(&mut self.recommendations),
        }
    }
}

/// Clamps a raw digit run to the score range. Runs too long for `u64` are
/// necessarily above the range.
fn clamp_score(digits: &str) -> u8 {
    match digits.parse::<u64>() {
        Ok(n) => n.clamp(MIN_SCORE as u64, MAX_SCORE as u64) as u8,
        Err(_) => MAX_SCORE,
    }
}

pub fn parse_sections(raw: &str) -> ScoreSections {
    let mut found = ScoreSections::default();
    let mut cursor: Option<Section> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((section, rest)) = Section::from_line(line) {
            cursor = Some(section);
            match found.slot_mut(section) {
                Some(slot) => *slot = Some(rest.to_string()),
                None => {
                    if let Some(m) = digit_run_regex().find(rest) {
                        found.score = Some(clamp_score(m.as_str()));
                    }
                }
            }
            continue;
        }

        let Some(slot) = cursor.and_then(|s| found.slot_mut(s)) else {
            continue;
        };
        match slot {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(line);
            }
            _ => *slot = Some(line.to_string()),
        }
    }

    found
}

/// Star rendering of a score: exactly `score` glyphs, nothing else.
pub fn stars_for(score: u8) -> String {
    STAR.repeat(score as usize)
}

/// Parsed match score as shown to the user. Replaced wholesale on every scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScoreResult {
    pub score: u8,
    pub stars: String,
    pub analysis: String,
    pub strengths: String,
    pub gaps: String,
    pub recommendations: String,
}

impl Default for MatchScoreResult {
    fn default() -> Self {
        ScoreSections::default().into()
    }
}

impl From<ScoreSections> for MatchScoreResult {
    fn from(found: ScoreSections) -> Self {
        let score = found.score.unwrap_or(DEFAULT_SCORE);
        let or_detail = |v: Option<String>| v.unwrap_or_else(|| DEFAULT_DETAIL.to_string());
        MatchScoreResult {
            score,
            stars: stars_for(score),
            analysis: found
                .analysis
                .unwrap_or_else(|| DEFAULT_ANALYSIS.to_string()),
            strengths: or_detail(found.strengths),
            gaps: or_detail(found.gaps),
            recommendations: or_detail(found.recommendations),
        }
    }
}

impl MatchScoreResult {
    /// Parses a raw model reply. Never fails; degrades to defaults.
    pub fn parse(raw: &str) -> Self {
        parse_sections(raw).into()
    }

    /// Short human verdict for the score.
    pub fn verdict(&self) -> &'static str {
        match self.score {
            5 => "Perfect Match!",
            4 => "Excellent Match!",
            3 => "Good Match!",
            2 => "Fair Match",
            _ => "Needs Improvement",
        }
    }
}
