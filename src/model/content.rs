//! Intermediate content representation.
//!
//! The extractor splits raw message text into [`ContentElement`]s; the
//! line classifier turns prose into [`FormattedChunk`]s whose paragraph
//! markup is carried as annotated spans rather than raw markdown.

use crate::style::Rgb;

/// A run of raw message text after table extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentElement {
    /// A run of prose lines.
    Text(String),

    /// A rectangular grid of cell strings; first row is the header.
    TableBlock(Vec<Vec<String>>),
}

/// Inline styling for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Code spans render in the monospace face.
    pub code: bool,
    /// Overrides the paragraph ink color.
    pub color: Option<Rgb>,
    /// Overrides the paragraph font size.
    pub size: Option<f64>,
}

impl RunStyle {
    /// Plain bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: RunStyle,
}

impl TextRun {
    /// Create a run with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a run with explicit styling.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Inline content within a formatted paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// A styled text run.
    Run(TextRun),

    /// A hard line break (blank source lines yield consecutive breaks).
    LineBreak,
}

/// A typed chunk emitted by the line classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedChunk {
    /// A `#`/`##`/`###` heading.
    Heading { level: u8, text: String },

    /// A paragraph of annotated spans with embedded line breaks.
    Paragraph(Vec<Inline>),

    /// Accumulated conclusion text, rendered as a boxed call-out.
    Conclusion(String),
}

/// Concatenated plain text of a span sequence (test helper and logging).
pub fn plain_text(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|s| match s {
            Inline::Run(run) => run.text.clone(),
            Inline::LineBreak => "\n".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let spans = vec![
            Inline::Run(TextRun::new("Hello ")),
            Inline::Run(TextRun::styled("world", RunStyle::bold())),
            Inline::LineBreak,
            Inline::Run(TextRun::new("next")),
        ];
        assert_eq!(plain_text(&spans), "Hello world\nnext");
    }

    #[test]
    fn test_run_style_default_is_plain() {
        let style = RunStyle::default();
        assert!(!style.bold && !style.italic && !style.code);
        assert!(style.color.is_none() && style.size.is_none());
    }
}
