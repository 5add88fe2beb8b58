//! Cover-letter PDF writer.
//!
//! Serialises the output of `render::layout` with `lopdf`. Text uses the
//! non-embedded base-14 Helvetica faces with WinAnsi encoding; characters
//! outside that code page are written as `?`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, StringFormat, Stream};
use thiserror::Error;
use tracing::debug;

use crate::render::font_metrics::{FontFace, PageConfig};
use crate::render::layout::{layout_letter, PageLayout, TITLE};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write PDF: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

/// Maps a char to its WinAnsiEncoding (CP-1252) byte.
pub fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// PDF text string for the Info dictionary: literal when ASCII, UTF-16BE with BOM otherwise.
fn info_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_content(page: &PageLayout) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.face.resource_name().into(), line.size_pt.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Lays out and writes the letter. `applicant_name` only feeds the document
/// title metadata; it is not printed on the page.
pub fn render_cover_letter_pdf(
    text: &str,
    applicant_name: &str,
    config: &PageConfig,
) -> Result<Vec<u8>, RenderError> {
    let pages = layout_letter(text, config);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Helvetica));
    let bold_id = doc.add_object(font_dictionary(FontFace::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular_id,
            FontFace::HelveticaBold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(page).encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.0_f32.into(),
                0.0_f32.into(),
                config.page_width_pt.into(),
                config.page_height_pt.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => info_string(&format!("{TITLE} - {applicant_name}")),
        "Producer" => Object::string_literal("covercraft"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    debug!(pages = pages.len(), bytes = buffer.len(), "rendered cover letter PDF");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::font_metrics::default_page_config;
    use crate::render::layout::split_paragraphs;

    /// Reads every `Tj` operand back out of the rendered file, page by page.
    fn shown_text(pdf: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(pdf).expect("rendered PDF must load");
        doc.get_pages()
            .values()
            .map(|page_id| {
                let raw = doc.get_page_content(*page_id).unwrap();
                Content::decode(&raw)
                    .unwrap()
                    .operations
                    .into_iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(bytes.iter().map(|&b| b as char).collect::<String>())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    const LETTER: &str = "Dear Hiring Manager,\n\nI am writing to apply for the Backend Engineer\nrole at Acme. Over six years I have built payment\nAPIs in Rust.\n\n\n\nI would welcome the chance to discuss the role.\n\nSincerely,\nJane Doe";

    #[test]
    fn test_output_is_a_pdf() {
        let bytes = render_cover_letter_pdf(LETTER, "Jane Doe", &default_page_config()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_round_trip_matches_text_download() {
        let bytes = render_cover_letter_pdf(LETTER, "Jane Doe", &default_page_config()).unwrap();
        let pages = shown_text(&bytes);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0], TITLE);

        let body = pages[0][1..].join(" ");
        let expected = split_paragraphs(LETTER).join(" ");
        assert_eq!(body, expected);
    }

    #[test]
    fn test_long_letter_spans_pages() {
        let paragraph = "Filler sentence to push the letter past a single page. ".repeat(10);
        let letter = vec![paragraph.trim(); 15].join("\n\n");
        let bytes = render_cover_letter_pdf(&letter, "[Your Name]", &default_page_config()).unwrap();
        let pages = shown_text(&bytes);
        assert!(pages.len() >= 2);
        let all: Vec<String> = pages.into_iter().flatten().skip(1).collect();
        assert_eq!(all.join(" "), split_paragraphs(&letter).join(" "));
    }

    #[test]
    fn test_title_metadata_uses_name() {
        let bytes = render_cover_letter_pdf("Hi.", "Jane Doe", &default_page_config()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        match info.get(b"Title").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"Cover Letter - Jane Doe"),
            other => panic!("unexpected title object {other:?}"),
        }
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(encode_win_ansi("A-z"), b"A-z".to_vec());
        assert_eq!(win_ansi_byte('é'), 0xE9);
        assert_eq!(win_ansi_byte('’'), 0x92);
        assert_eq!(win_ansi_byte('—'), 0x97);
        assert_eq!(win_ansi_byte('€'), 0x80);
        assert_eq!(win_ansi_byte('漢'), b'?');
        assert_eq!(win_ansi_byte('\t'), b'?');
    }

    #[test]
    fn test_non_ascii_title_is_utf16() {
        match info_string("José") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(bytes.len(), 2 + 4 * 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
