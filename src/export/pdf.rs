/*!
 * PDF export.
 *
 * Text is set in the standard Helvetica font (WinAnsiEncoding), wrapped
 * greedily to the content width and flowed onto as many pages as needed.
 * Characters outside Latin-1 are written as `?` since no font is embedded.
 */

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::app_config::ExportConfig;
use crate::errors::ExportError;

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const FONT_RESOURCE: &str = "F1";

/// Helvetica advance width in 1/1000 em
fn char_width(ch: char) -> f32 {
    match ch {
        ' ' | '.' | ',' | ':' | ';' | '/' | '\\' | 'f' | 't' | 'I' => 278.0,
        'i' | 'j' | 'l' | '\'' => 222.0,
        'r' | '-' | '!' | '(' | ')' | '[' | ']' | '`' => 333.0,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | '?' | '^' => 500.0,
        'm' => 833.0,
        'w' => 722.0,
        'M' => 833.0,
        'W' => 944.0,
        'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' | '&' => 722.0,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667.0,
        'F' | 'L' | 'T' | 'Z' => 611.0,
        'G' | 'O' | 'Q' => 778.0,
        'J' => 556.0,
        '"' => 355.0,
        '*' => 389.0,
        '+' | '=' | '<' | '>' | '~' => 584.0,
        '%' => 889.0,
        '@' => 1015.0,
        '|' => 260.0,
        _ => 556.0,
    }
}

/// Width of `text` in points at `font_size`
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width).sum::<f32>() * font_size / 1000.0
}

/// Wrap `text` into lines no wider than `max_width` points
///
/// Each `\n` starts a new line; an empty input line stays an empty output
/// line. Words wider than the whole line are broken between characters.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font_size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, font_size) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    current.push(ch);
                    if text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::replace(&mut current, ch.to_string()));
                    }
                }
            }
        }
        lines.push(current);
    }

    lines
}

/// Map text to WinAnsi bytes, replacing what the encoding cannot hold
fn encode_win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|ch| match ch as u32 {
            0x09 => b' ',
            0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn points(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Render `text` as a PDF document
pub fn render_pdf(text: &str, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    let font_size = config.font_size_pt.round().max(1.0);
    let leading = (font_size * config.line_height_factor).round().max(1.0);
    let page_width = points(config.page_width_mm).round();
    let page_height = points(config.page_height_mm).round();
    let margin = points(config.margin_mm).round();
    let content_width = points(config.content_width_mm);

    let first_baseline = page_height - margin - font_size;
    let usable = (first_baseline - margin).max(0.0);
    let lines_per_page = ((usable / leading).floor() as usize + 1).max(1);

    let lines = wrap_text(text, content_width, font_size);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids = Vec::new();
    for page_lines in lines.chunks(lines_per_page) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![FONT_RESOURCE.into(), Object::Integer(font_size as i64)],
            ),
            Operation::new("TL", vec![Object::Integer(leading as i64)]),
            Operation::new(
                "Td",
                vec![
                    Object::Integer(margin as i64),
                    Object::Integer(first_baseline as i64),
                ],
            ),
        ];
        for (index, line) in page_lines.iter().enumerate() {
            if index > 0 {
                operations.push(Operation::new("T*", vec![]));
            }
            if !line.is_empty() {
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(line))],
                ));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(page_width as i64),
                Object::Integer(page_height as i64),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}
