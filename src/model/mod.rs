//! Data model for report generation.
//!
//! The input side (messages, report metadata) is serde-backed; the
//! intermediate representation (content elements, formatted chunks)
//! bridges line classification and page rendering.

mod content;
mod message;
mod metadata;

pub use content::{plain_text, ContentElement, FormattedChunk, Inline, RunStyle, TextRun};
pub use message::{Message, ReportInput};
pub use metadata::{ReportMetadata, ReportType};
