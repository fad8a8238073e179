//! PDF serialization via `lopdf`.
//!
//! Translates decorated page operation lists into a PDF document using
//! the base-14 Type1 fonts. Content streams are left uncompressed so
//! the output stays byte-stable for identical input.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::Result;
use crate::style::{Rgb, StyleSheet};

use super::engine::DrawOp;
use super::metrics::Font;

/// Serialize decorated pages into PDF bytes.
pub fn emit(pages: &[Vec<DrawOp>], style: &StyleSheet) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let mut entry = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
        };
        // ZapfDingbats carries its own built-in encoding
        if font != Font::ZapfDingbats {
            entry.set("Encoding", "WinAnsiEncoding");
        }
        let id = doc.add_object(entry);
        fonts.set(font.resource_name(), Object::Reference(id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids = Vec::with_capacity(pages.len());
    for ops in pages {
        let content = Content {
            operations: page_operations(ops),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                real(style.page_width),
                real(style.page_height),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn rgb(operator: &str, color: Rgb) -> Operation {
    Operation::new(
        operator,
        vec![
            Object::Real(color.r),
            Object::Real(color.g),
            Object::Real(color.b),
        ],
    )
}

fn page_operations(ops: &[DrawOp]) -> Vec<Operation> {
    let mut out = Vec::new();
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                word_spacing,
                text,
            } => {
                out.push(Operation::new("BT", vec![]));
                out.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), real(*size)],
                ));
                out.push(rgb("rg", *color));
                out.push(Operation::new("Tw", vec![real(*word_spacing)]));
                out.push(Operation::new("Td", vec![real(*x), real(*y)]));
                out.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_text(*font, text))],
                ));
                out.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                out.push(Operation::new("q", vec![]));
                out.push(rgb("RG", *color));
                out.push(Operation::new("w", vec![real(*width)]));
                out.push(Operation::new("m", vec![real(*x1), real(*y1)]));
                out.push(Operation::new("l", vec![real(*x2), real(*y2)]));
                out.push(Operation::new("S", vec![]));
                out.push(Operation::new("Q", vec![]));
            }
            DrawOp::Rect {
                x,
                y,
                w,
                h,
                fill,
                stroke,
            } => {
                out.push(Operation::new("q", vec![]));
                if let Some(fill) = fill {
                    out.push(rgb("rg", *fill));
                }
                if let Some(stroke) = stroke {
                    out.push(rgb("RG", stroke.color));
                    out.push(Operation::new("w", vec![real(stroke.width)]));
                }
                out.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*w), real(*h)],
                ));
                let paint = match (fill.is_some(), stroke.is_some()) {
                    (true, true) => "B",
                    (true, false) => "f",
                    _ => "S",
                };
                out.push(Operation::new(paint, vec![]));
                out.push(Operation::new("Q", vec![]));
            }
        }
    }
    out
}

/// Encode text for the given face.
///
/// Latin faces use WinAnsi with the punctuation the report dialect
/// produces; anything unmappable degrades to `?`. ZapfDingbats maps the
/// check/cross glyphs to their standard codes.
fn encode_text(font: Font, text: &str) -> Vec<u8> {
    if font == Font::ZapfDingbats {
        return text
            .chars()
            .map(|c| match c {
                '✓' => 0x33,
                '✔' => 0x34,
                '✖' => 0x36,
                '✗' => 0x37,
                _ => b'?',
            })
            .collect();
    }
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let b = match c {
            ' '..='~' => c as u8,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        };
        // Literal string delimiters need escaping
        match b {
            b'(' | b')' | b'\\' => {
                bytes.push(b'\\');
                bytes.push(b);
            }
            _ => bytes.push(b),
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_op(text: &str) -> DrawOp {
        DrawOp::Text {
            x: 100.0,
            y: 700.0,
            font: Font::Helvetica,
            size: 11.0,
            color: Rgb::BLACK,
            word_spacing: 0.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_emit_loadable_document() {
        let style = StyleSheet::default();
        let pages = vec![vec![text_op("hello")], vec![text_op("world")]];
        let bytes = emit(&pages, &style).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_emit_is_deterministic() {
        let style = StyleSheet::default();
        let pages = vec![vec![text_op("stable")]];
        let a = emit(&pages, &style).unwrap();
        let b = emit(&pages, &style).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_winansi_punctuation() {
        assert_eq!(encode_text(Font::Helvetica, "a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_text(Font::Helvetica, "•"), vec![0x95]);
        // Unmappable characters degrade to '?'
        assert_eq!(encode_text(Font::Helvetica, "日"), vec![b'?']);
    }

    #[test]
    fn test_literal_delimiters_escaped() {
        assert_eq!(
            encode_text(Font::Helvetica, "(x)"),
            vec![b'\\', b'(', b'x', b'\\', b')']
        );
    }

    #[test]
    fn test_dingbat_codes() {
        assert_eq!(
            encode_text(Font::ZapfDingbats, "✓✔✖✗"),
            vec![0x33, 0x34, 0x36, 0x37]
        );
    }

    #[test]
    fn test_content_stream_uncompressed() {
        let style = StyleSheet::default();
        let bytes = emit(&[vec![text_op("inspectable")]], &style).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("inspectable"));
    }
}
