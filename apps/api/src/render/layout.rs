//! Cover-letter layout: turns letter text into positioned lines on pages.
//!
//! Pure and deterministic; `render::pdf` only serialises what this produces.
//!
//! - Paragraphs are separated by one or more blank lines (whitespace-only
//!   lines count as blank). Inside a paragraph every whitespace run,
//!   newlines included, collapses to one space.
//! - Lines are filled greedily word by word against the text width. A single
//!   word wider than the line is split across lines by characters.
//! - A new page starts when the next line would cross the bottom margin.
//!   The title appears once, centered, at the top of page 1. Paragraph spacing
//!   is dropped at the top of a fresh page.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::render::font_metrics::{get_metrics, FontFace, FontMetricTable, PageConfig};

pub const TITLE: &str = "Cover Letter";

fn paragraph_break_regex() -> &'static Regex {
    static BREAK: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\n\s*\n").expect("Failed to create paragraph_break_regex"));
    &BREAK
}

/// One line of text placed on a page. `x`/`y` are the baseline origin in PDF
/// user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Splits letter text into normalised paragraphs, dropping empty ones.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    paragraph_break_regex()
        .split(normalized.trim())
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Greedy word wrap at `max_width_pt`.
pub fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let space_w = metrics.space_width * size_pt;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.width_pt(word, size_pt);

        if word_w > max_width_pt {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = split_long_word(word, metrics, size_pt, max_width_pt);
            // The last piece stays open so following words can join it.
            let tail = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = metrics.width_pt(&tail, size_pt);
            current = tail;
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_pt {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let c_w = metrics.width_pt(c.encode_utf8(&mut buf), size_pt);
        if !piece.is_empty() && width + c_w > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += c_w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Lays out the full letter: title block plus wrapped, paginated paragraphs.
/// Always returns at least one page.
pub fn layout_letter(text: &str, config: &PageConfig) -> Vec<PageLayout> {
    let body_metrics = get_metrics(config.body_font);
    let title_metrics = get_metrics(config.title_font);
    let text_width = config.text_width_pt();
    let top = config.page_height_pt - config.margin_top_pt;

    let mut pages = vec![PageLayout::default()];
    let mut cursor = top;

    let title_w = title_metrics.width_pt(TITLE, config.title_size_pt);
    pages[0].lines.push(PlacedLine {
        text: TITLE.to_string(),
        face: title_metrics.face,
        size_pt: config.title_size_pt,
        x: (config.page_width_pt - title_w) / 2.0,
        y: cursor - config.title_size_pt,
    });
    cursor -= config.title_size_pt * 1.2 + config.title_space_after_pt;

    for paragraph in split_paragraphs(text) {
        let lines = wrap_paragraph(&paragraph, body_metrics, config.body_size_pt, text_width);

        for line in lines {
            if cursor - config.body_leading_pt < config.margin_bottom_pt {
                pages.push(PageLayout::default());
                cursor = top;
            }
            let page = pages.len() - 1;
            pages[page].lines.push(PlacedLine {
                text: line,
                face: body_metrics.face,
                size_pt: config.body_size_pt,
                x: config.margin_left_pt,
                y: cursor - config.body_size_pt,
            });
            cursor -= config.body_leading_pt;
        }

        cursor -= config.paragraph_gap_pt;
        if cursor < config.margin_bottom_pt {
            pages.push(PageLayout::default());
            cursor = top;
        }
    }

    // A gap-triggered break after the last paragraph leaves an empty page.
    if pages.len() > 1 && pages.last().map_or(false, |p| p.lines.is_empty()) {
        pages.pop();
    }
    pages
}
