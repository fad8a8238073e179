//! # mdpdf
//!
//! Styled PDF report generation from chat-style assistant messages.
//!
//! This library takes a JSON payload of messages written in a
//! constrained markdown dialect and produces a paginated, professionally
//! styled PDF report: cover page, classified prose, captioned tables,
//! conclusion call-outs, and exact `Page N of M` footers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdpdf::{generate_report_file, parse_input, BuildOptions};
//!
//! fn main() -> mdpdf::Result<()> {
//!     let payload = r##"{
//!         "messages": [{"role": "assistant", "content": "# Findings\nAll targets met."}],
//!         "reportType": "measurability"
//!     }"##;
//!
//!     let input = parse_input(payload)?;
//!     generate_report_file(&input, &BuildOptions::new(), "output.pdf")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two accepted payload forms**: object with `messages`/`reportType`/
//!   `reportTitle`, or a legacy bare message array
//! - **Report profiles**: consistency, measurability, relevance,
//!   presentation, general
//! - **Markdown dialect**: headings, bold/italic/code spans, list
//!   normalization, pipe tables with content-proportional columns
//! - **Domain keywords**: assessment phrasing is detected and emphasized
//! - **Conclusion call-outs**: boxed, kept together across page breaks
//! - **Deterministic output**: byte-identical PDFs when the date is pinned

pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{CellAlign, LayoutCell, TableLayout, TableLayoutEngine};
pub use model::{
    ContentElement, FormattedChunk, Inline, Message, ReportInput, ReportMetadata, ReportType,
    RunStyle, TextRun,
};
pub use render::{render_pdf, BuildOptions};
pub use style::{Rgb, StyleSheet};

use std::path::Path;

/// Parse a JSON payload in either accepted form.
///
/// # Example
///
/// ```
/// use mdpdf::parse_input;
///
/// let input = parse_input(r#"[{"role": "assistant", "content": "hi"}]"#).unwrap();
/// assert_eq!(input.messages.len(), 1);
/// ```
pub fn parse_input(json: &str) -> Result<ReportInput> {
    ReportInput::from_json(json)
}

/// Generate a PDF report and return its bytes.
///
/// # Example
///
/// ```no_run
/// use mdpdf::{generate_report, parse_input, BuildOptions};
///
/// let input = parse_input(r#"{"messages": []}"#).unwrap();
/// let bytes = generate_report(&input, &BuildOptions::new()).unwrap();
/// assert!(bytes.starts_with(b"%PDF"));
/// ```
pub fn generate_report(input: &ReportInput, options: &BuildOptions) -> Result<Vec<u8>> {
    render_pdf(input, options)
}

/// Generate a PDF report and write it to `path`.
pub fn generate_report_file<P: AsRef<Path>>(
    input: &ReportInput,
    options: &BuildOptions,
    path: P,
) -> Result<()> {
    let bytes = generate_report(input, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
