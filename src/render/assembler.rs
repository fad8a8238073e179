//! Document assembly.
//!
//! Turns the parsed input into a flat block sequence: cover page,
//! section separators, captioned tables, classified prose, and
//! conclusion call-outs. Blocks are geometry-free; the layout engine
//! resolves them against the page frame.

use crate::layout::{TableLayout, TableLayoutEngine};
use crate::model::{plain_text, FormattedChunk, Inline, ReportInput, ReportMetadata, RunStyle, TextRun};
use crate::parser::{extract_elements, KeywordCatalogue, LineClassifier};
use crate::style::{Rgb, StyleSheet, CM};

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

/// A flowed paragraph with resolved typography.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphBlock {
    pub spans: Vec<Inline>,
    pub size: f64,
    pub leading: f64,
    pub align: Align,
    pub color: Rgb,
    pub space_before: f64,
    pub space_after: f64,
    /// Base weight; individual runs may add their own styling on top.
    pub bold: bool,
    pub italic: bool,
}

impl ParagraphBlock {
    fn plain(text: impl Into<String>, size: f64, color: Rgb) -> Self {
        Self {
            spans: vec![Inline::Run(TextRun::new(text.into()))],
            size,
            leading: size * 1.25,
            align: Align::Left,
            color,
            space_before: 0.0,
            space_after: 0.0,
            bold: false,
            italic: false,
        }
    }
}

/// One element of the assembled document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocBlock {
    /// Fixed vertical gap in points.
    Spacer(f64),

    /// Horizontal rule across the content width.
    Rule { thickness: f64, color: Rgb },

    Paragraph(ParagraphBlock),

    Table(TableLayout),

    /// Boxed conclusion call-out.
    Conclusion(String),

    PageBreak,
}

/// Assemble the full block sequence for one report.
pub fn assemble(
    input: &ReportInput,
    meta: &ReportMetadata,
    date_text: &str,
    style: &StyleSheet,
) -> Vec<DocBlock> {
    let mut blocks = cover(meta, date_text, style);

    blocks.push(DocBlock::PageBreak);
    blocks.push(DocBlock::Spacer(0.5 * CM));
    blocks.push(DocBlock::Rule {
        thickness: 1.0,
        color: style.light_rule,
    });
    blocks.push(DocBlock::Spacer(20.0));

    let catalogue = KeywordCatalogue::new(style);
    let table_engine = TableLayoutEngine::new(style);
    let mut table_counter = 1usize;

    for (idx, msg) in input.messages.iter().enumerate() {
        if !msg.is_assistant() {
            continue;
        }

        for element in extract_elements(&msg.content) {
            match element {
                crate::model::ContentElement::TableBlock(grid) => {
                    let mut caption = ParagraphBlock::plain(
                        format!("Table {table_counter}: Data Overview"),
                        12.0,
                        style.navy,
                    );
                    caption.bold = true;
                    caption.space_before = 16.0;
                    caption.space_after = 8.0;
                    table_counter += 1;

                    blocks.push(DocBlock::Paragraph(caption));
                    blocks.push(DocBlock::Table(table_engine.layout(&grid)));
                    blocks.push(DocBlock::Spacer(0.3 * CM));
                }
                crate::model::ContentElement::Text(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    for chunk in LineClassifier::new(text, &catalogue) {
                        push_chunk(&mut blocks, chunk, style);
                    }
                }
            }
        }

        // Section separator between messages
        if idx < input.messages.len() - 1 {
            blocks.push(DocBlock::Spacer(0.4 * CM));
            blocks.push(DocBlock::Rule {
                thickness: 0.5,
                color: style.light_rule,
            });
            blocks.push(DocBlock::Spacer(20.0));
        }
    }

    blocks
}

fn push_chunk(blocks: &mut Vec<DocBlock>, chunk: FormattedChunk, style: &StyleSheet) {
    match chunk {
        FormattedChunk::Heading { level, text } => {
            let (size, color) = match level {
                1 => (18.0, style.navy),
                2 => (14.0, style.blue),
                _ => (12.0, style.subhead),
            };
            let mut heading = ParagraphBlock::plain(text, size, color);
            heading.bold = true;
            heading.space_before = 6.0;
            heading.space_after = 12.0;
            blocks.push(DocBlock::Paragraph(heading));
        }
        FormattedChunk::Paragraph(spans) => {
            // Whitespace-only paragraphs contribute nothing
            if plain_text(&spans).trim().is_empty() {
                return;
            }
            blocks.push(DocBlock::Paragraph(ParagraphBlock {
                spans,
                size: style.body_size,
                leading: style.body_leading,
                align: Align::Justify,
                color: style.ink,
                space_before: 6.0,
                space_after: 12.0,
                bold: false,
                italic: false,
            }));
        }
        FormattedChunk::Conclusion(text) => {
            blocks.push(DocBlock::Spacer(0.2 * CM));
            blocks.push(DocBlock::Conclusion(text));
            blocks.push(DocBlock::Spacer(0.3 * CM));
        }
    }
}

fn cover(meta: &ReportMetadata, date_text: &str, style: &StyleSheet) -> Vec<DocBlock> {
    let mut blocks = vec![DocBlock::Spacer(3.0 * CM)];

    let mut title = ParagraphBlock::plain(meta.title.clone(), 24.0, style.navy);
    title.bold = true;
    title.align = Align::Center;
    title.leading = 30.0;
    title.space_after = 20.0;
    blocks.push(DocBlock::Paragraph(title));

    let mut subtitle = ParagraphBlock::plain(meta.subtitle, 14.0, style.blue);
    subtitle.align = Align::Center;
    subtitle.space_after = 40.0;
    blocks.push(DocBlock::Paragraph(subtitle));

    blocks.push(DocBlock::Spacer(4.0 * CM));

    let items = [
        ("Date Generated:", date_text.to_string()),
        ("Document Type:", meta.doc_type.to_string()),
        ("Report Category:", meta.category.clone()),
        ("Status:", "Final".to_string()),
    ];
    for (label, value) in items {
        blocks.push(DocBlock::Paragraph(ParagraphBlock {
            spans: vec![
                Inline::Run(TextRun::styled(label, RunStyle::bold())),
                Inline::Run(TextRun::new(format!(" {value}"))),
            ],
            size: 11.0,
            leading: 14.0,
            align: Align::Left,
            color: style.grey,
            space_before: 0.0,
            space_after: 8.0,
            bold: false,
            italic: false,
        }));
    }

    blocks.push(DocBlock::Spacer(2.0 * CM));

    let mut notice = ParagraphBlock::plain(
        "This document contains professional analysis and assessment data",
        9.0,
        style.notice_grey,
    );
    notice.italic = true;
    notice.align = Align::Center;
    blocks.push(DocBlock::Paragraph(notice));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Message;

    fn assemble_messages(messages: Vec<Message>) -> Vec<DocBlock> {
        let input = ReportInput::from_messages(messages).with_report_type("measurability");
        let meta = ReportMetadata::resolve(&input.report_type, input.report_title.as_deref());
        assemble(&input, &meta, "August 25, 2026", &StyleSheet::default())
    }

    fn paragraph_texts(blocks: &[DocBlock]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::Paragraph(p) => Some(plain_text(&p.spans)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_cover_precedes_content() {
        let blocks = assemble_messages(vec![Message::assistant("body text")]);
        let break_pos = blocks
            .iter()
            .position(|b| matches!(b, DocBlock::PageBreak))
            .unwrap();
        let texts = paragraph_texts(&blocks[..break_pos]);
        assert!(texts.iter().any(|t| t.contains("Professional Assessment Report")));
        assert!(texts.iter().any(|t| t.contains("Measurability Assessment and Evaluation")));
        assert!(texts.iter().any(|t| t.contains("Date Generated: August 25, 2026")));
        assert!(texts.iter().any(|t| t.contains("Status: Final")));
    }

    #[test]
    fn test_unknown_report_type_keeps_raw_category() {
        let input = ReportInput::from_messages(vec![Message::assistant("body")])
            .with_report_type("forensic");
        let meta = ReportMetadata::resolve(&input.report_type, input.report_title.as_deref());
        let blocks = assemble(&input, &meta, "August 25, 2026", &StyleSheet::default());
        let texts = paragraph_texts(&blocks);
        // Category line shows the caller's word; the profile still falls
        // back to general
        assert!(texts.iter().any(|t| t.contains("Report Category: Forensic")));
        assert!(texts
            .iter()
            .any(|t| t.contains("Performance Analysis and Evaluation")));
    }

    #[test]
    fn test_non_assistant_messages_skipped() {
        let blocks = assemble_messages(vec![
            Message {
                role: "user".to_string(),
                content: "should not appear".to_string(),
            },
            Message::assistant("visible content"),
        ]);
        let texts = paragraph_texts(&blocks);
        assert!(!texts.iter().any(|t| t.contains("should not appear")));
        assert!(texts.iter().any(|t| t.contains("visible content")));
    }

    #[test]
    fn test_table_captions_count_across_messages() {
        let table = "| A | B |\n|---|---|\n| 1 | 2 |";
        let blocks = assemble_messages(vec![
            Message::assistant(table),
            Message::assistant(table),
        ]);
        let texts = paragraph_texts(&blocks);
        assert!(texts.iter().any(|t| t == "Table 1: Data Overview"));
        assert!(texts.iter().any(|t| t == "Table 2: Data Overview"));
        let tables = blocks
            .iter()
            .filter(|b| matches!(b, DocBlock::Table(_)))
            .count();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_separator_between_messages() {
        let blocks = assemble_messages(vec![
            Message::assistant("first"),
            Message::assistant("second"),
        ]);
        let thin_rules = blocks
            .iter()
            .filter(|b| matches!(b, DocBlock::Rule { thickness, .. } if *thickness == 0.5))
            .count();
        assert_eq!(thin_rules, 1);
    }

    #[test]
    fn test_conclusion_becomes_callout() {
        let blocks =
            assemble_messages(vec![Message::assistant("Conclusion: targets were met")]);
        assert!(blocks
            .iter()
            .any(|b| matches!(b, DocBlock::Conclusion(text) if text == "targets were met")));
    }

    #[test]
    fn test_heading_typography() {
        let blocks = assemble_messages(vec![Message::assistant("# Main\n## Section\n### Sub")]);
        let style = StyleSheet::default();
        let headings: Vec<&ParagraphBlock> = blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::Paragraph(p) if p.bold && p.align == Align::Left => Some(p),
                _ => None,
            })
            .filter(|p| {
                let t = plain_text(&p.spans);
                t == "Main" || t == "Section" || t == "Sub"
            })
            .collect();
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].size, 18.0);
        assert_eq!(headings[0].color, style.navy);
        assert_eq!(headings[1].size, 14.0);
        assert_eq!(headings[1].color, style.blue);
        assert_eq!(headings[2].size, 12.0);
        assert_eq!(headings[2].color, style.subhead);
    }

    #[test]
    fn test_degenerate_table_dropped_silently() {
        let blocks = assemble_messages(vec![Message::assistant("| lone header |")]);
        assert!(!blocks.iter().any(|b| matches!(b, DocBlock::Table(_))));
        let texts = paragraph_texts(&blocks);
        assert!(!texts.iter().any(|t| t.contains("Table 1")));
    }

    #[test]
    fn test_body_paragraphs_justified() {
        let blocks = assemble_messages(vec![Message::assistant("plain body text")]);
        let body = blocks
            .iter()
            .find_map(|b| match b {
                DocBlock::Paragraph(p) if plain_text(&p.spans) == "plain body text" => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(body.align, Align::Justify);
        assert_eq!(body.size, 11.0);
        assert_eq!(body.leading, 16.0);
    }
}
