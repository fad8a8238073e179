//! Content parsing: table extraction and line classification.

mod classifier;
mod extractor;
mod table;

pub use classifier::{KeywordCatalogue, LineClassifier};
pub use extractor::extract_elements;
pub use table::parse_table;
