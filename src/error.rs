//! Error types for the mdpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for mdpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing the output artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input payload is not valid JSON or has the wrong shape.
    #[error("Input parsing error: {0}")]
    InputParse(#[from] serde_json::Error),

    /// Error assembling or laying out document content.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error emitting the PDF byte stream.
    #[error("PDF emission error: {0}")]
    Pdf(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}
