//! Report rendering pipeline.
//!
//! Rendering is two-pass: the assembler and layout engine produce page
//! snapshots first, then each snapshot is decorated with its header and
//! `Page N of M` footer once the total count is known, and the result
//! is serialized with `lopdf`.

mod assembler;
mod engine;
mod metrics;
mod paginate;
mod pdf;

pub use assembler::{assemble, Align, DocBlock, ParagraphBlock};
pub use engine::{DrawOp, LayoutEngine, PageSnapshot, Stroke};
pub use metrics::Font;
pub use paginate::decorate_page;

use chrono::NaiveDate;
use log::debug;

use crate::error::Result;
use crate::model::{ReportInput, ReportMetadata};
use crate::style::StyleSheet;

/// Options for one report build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Style sheet used for the build.
    pub style: StyleSheet,

    /// Fixed generation date; `None` uses the current local date.
    /// Pinning the date makes output reproducible.
    pub generated_date: Option<NaiveDate>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style sheet.
    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    /// Pin the generation date.
    pub fn with_generated_date(mut self, date: NaiveDate) -> Self {
        self.generated_date = Some(date);
        self
    }
}

/// Render a parsed input payload into PDF bytes.
pub fn render_pdf(input: &ReportInput, options: &BuildOptions) -> Result<Vec<u8>> {
    let style = &options.style;
    let meta = ReportMetadata::resolve(&input.report_type, input.report_title.as_deref());
    let date_text = match options.generated_date {
        Some(date) => date.format("%B %d, %Y").to_string(),
        None => chrono::Local::now().format("%B %d, %Y").to_string(),
    };

    let blocks = assemble(input, &meta, &date_text, style);
    let snapshots = LayoutEngine::new(style).run(&blocks);
    let total = snapshots.len();
    debug!(
        "laid out {} block(s) across {} page(s)",
        blocks.len(),
        total
    );

    let pages: Vec<Vec<DrawOp>> = snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| decorate_page(snapshot, i, total, meta.header, &date_text, style))
        .collect();

    pdf::emit(&pages, style)
}
