//! Report type and cover/header metadata profiles.

use serde::{Deserialize, Serialize};

/// Default cover title when the payload supplies none.
pub const DEFAULT_TITLE: &str = "Professional Assessment Report";

/// Enumerated report category selecting a fixed metadata profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Consistency,
    Measurability,
    Relevance,
    Presentation,
    General,
}

impl ReportType {
    /// Resolve a raw type string; unknown values fall back to `General`.
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "consistency" => ReportType::Consistency,
            "measurability" => ReportType::Measurability,
            "relevance" => ReportType::Relevance,
            "presentation" => ReportType::Presentation,
            _ => ReportType::General,
        }
    }

}

/// Cover and page-header metadata derived once per build.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Resolved report category.
    pub report_type: ReportType,

    /// "Report Category" cover line: the raw input type title-cased,
    /// even when the profile fell back to `General`.
    pub category: String,

    /// Cover title.
    pub title: String,

    /// Cover subtitle.
    pub subtitle: &'static str,

    /// "Document Type" metadata line.
    pub doc_type: &'static str,

    /// Page-header label.
    pub header: &'static str,
}

impl ReportMetadata {
    /// Resolve the metadata profile for a raw type string and optional title.
    pub fn resolve(report_type: &str, title: Option<&str>) -> Self {
        let category = title_case(report_type);
        let report_type = ReportType::from_str_lossy(report_type);
        let (subtitle, doc_type, header) = match report_type {
            ReportType::Consistency => (
                "Consistency Analysis and Verification",
                "Consistency Report",
                "Consistency Analysis",
            ),
            ReportType::Measurability => (
                "Measurability Assessment and Evaluation",
                "Measurability Report",
                "Measurability Analysis",
            ),
            ReportType::Relevance => (
                "Relevance and Alignment Assessment",
                "Relevance Report",
                "Relevance Analysis",
            ),
            ReportType::Presentation => (
                "Presentation Quality and Standards Review",
                "Presentation Report",
                "Presentation Analysis",
            ),
            ReportType::General => (
                "Performance Analysis and Evaluation",
                "Professional Report",
                "Professional Report",
            ),
        };

        Self {
            report_type,
            category,
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            subtitle,
            doc_type,
            header,
        }
    }
}

/// Title-case each whitespace-separated word.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_type() {
        let meta = ReportMetadata::resolve("measurability", None);
        assert_eq!(meta.report_type, ReportType::Measurability);
        assert_eq!(meta.doc_type, "Measurability Report");
        assert_eq!(meta.header, "Measurability Analysis");
        assert_eq!(meta.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_unknown_type_falls_back_to_general() {
        let meta = ReportMetadata::resolve("forensic", None);
        assert_eq!(meta.report_type, ReportType::General);
        assert_eq!(meta.doc_type, "Professional Report");
        // The category line keeps the caller's word, not the fallback's
        assert_eq!(meta.category, "Forensic");
    }

    #[test]
    fn test_category_title_cased_from_raw_type() {
        assert_eq!(ReportMetadata::resolve("measurability", None).category, "Measurability");
        assert_eq!(ReportMetadata::resolve("ANNUAL audit", None).category, "Annual Audit");
        assert_eq!(ReportMetadata::resolve("", None).category, "");
    }

    #[test]
    fn test_custom_title() {
        let meta = ReportMetadata::resolve("relevance", Some("Q3 Review"));
        assert_eq!(meta.title, "Q3 Review");
        assert_eq!(meta.subtitle, "Relevance and Alignment Assessment");
    }

    #[test]
    fn test_from_str_lossy() {
        assert_eq!(ReportType::from_str_lossy("presentation"), ReportType::Presentation);
        assert_eq!(ReportType::from_str_lossy(""), ReportType::General);
    }
}
