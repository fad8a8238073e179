//! Input payload types.

use serde::{Deserialize, Serialize};

fn default_role() -> String {
    "assistant".to_string()
}

/// One chat message from the input payload.
///
/// Only assistant messages contribute content to the report; all other
/// roles are skipped by the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role. A missing role defaults to `assistant`.
    #[serde(default = "default_role")]
    pub role: String,

    /// Raw message text in the report markdown dialect.
    #[serde(default)]
    pub content: String,
}

impl Message {
    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: default_role(),
            content: content.into(),
        }
    }

    /// Whether this message contributes to the document.
    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }
}

/// Parsed input payload.
///
/// Accepts either the object form
/// `{"messages": [...], "reportType": "...", "reportTitle": "..."}`
/// or the legacy bare array of messages.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// Messages in document order.
    pub messages: Vec<Message>,

    /// Raw report type string; unknown values fall back to `general`.
    pub report_type: String,

    /// Optional custom title for the cover page.
    pub report_title: Option<String>,
}

impl ReportInput {
    /// Parse a JSON payload in either accepted form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let raw: RawInput = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Build an input from messages with the default profile.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            report_type: "general".to_string(),
            report_title: None,
        }
    }

    /// Set the report type and return self.
    pub fn with_report_type(mut self, report_type: impl Into<String>) -> Self {
        self.report_type = report_type.into();
        self
    }

    /// Set the report title and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.report_title = Some(title.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Object(ObjectInput),
    Legacy(Vec<Message>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectInput {
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default = "default_report_type")]
    report_type: String,
    #[serde(default)]
    report_title: Option<String>,
}

fn default_report_type() -> String {
    "general".to_string()
}

impl From<RawInput> for ReportInput {
    fn from(raw: RawInput) -> Self {
        match raw {
            RawInput::Object(o) => ReportInput {
                messages: o.messages,
                report_type: o.report_type,
                report_title: o.report_title,
            },
            RawInput::Legacy(messages) => ReportInput::from_messages(messages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_form() {
        let input = ReportInput::from_json(
            r#"{"messages":[{"role":"assistant","content":"hi"}],"reportType":"relevance","reportTitle":"Q3"}"#,
        )
        .unwrap();
        assert_eq!(input.messages.len(), 1);
        assert_eq!(input.report_type, "relevance");
        assert_eq!(input.report_title.as_deref(), Some("Q3"));
    }

    #[test]
    fn test_legacy_array_form() {
        let input =
            ReportInput::from_json(r#"[{"role":"assistant","content":"hi"}]"#).unwrap();
        assert_eq!(input.messages.len(), 1);
        assert_eq!(input.report_type, "general");
        assert!(input.report_title.is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let input = ReportInput::from_json(r#"{"messages":[{}]}"#).unwrap();
        let msg = &input.messages[0];
        assert!(msg.is_assistant());
        assert_eq!(msg.content, "");
        assert_eq!(input.report_type, "general");
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(ReportInput::from_json("{not json").is_err());
    }

    #[test]
    fn test_non_assistant_role() {
        let msg = Message {
            role: "user".to_string(),
            content: "question".to_string(),
        };
        assert!(!msg.is_assistant());
    }
}
