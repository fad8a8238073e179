//! Table block extraction.
//!
//! Splits one message's raw text into alternating runs of table-like
//! lines and prose lines, yielding [`ContentElement`]s in source order.

use log::warn;

use crate::model::ContentElement;

use super::parse_table;

/// A line is table-like iff it contains a pipe and either a dash or any
/// alphanumeric character. A lone pipe in prose does not qualify.
fn is_table_like(line: &str) -> bool {
    line.contains('|') && (line.contains('-') || line.chars().any(|c| c.is_alphanumeric()))
}

/// Split raw message text into text and table elements.
///
/// Table runs that fail to parse (fewer than two surviving rows) are
/// dropped rather than re-emitted as prose; the loss is logged.
pub fn extract_elements(content: &str) -> Vec<ContentElement> {
    let mut elements = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut table_lines: Vec<&str> = Vec::new();
    let mut in_table = false;

    for line in content.split('\n') {
        if is_table_like(line) {
            if !in_table {
                if !prose.is_empty() {
                    elements.push(ContentElement::Text(prose.join("\n")));
                    prose.clear();
                }
                in_table = true;
            }
            table_lines.push(line);
        } else {
            if in_table {
                flush_table(&mut elements, &mut table_lines);
                in_table = false;
            }
            prose.push(line);
        }
    }

    if in_table && !table_lines.is_empty() {
        flush_table(&mut elements, &mut table_lines);
    } else if !prose.is_empty() {
        elements.push(ContentElement::Text(prose.join("\n")));
    }

    elements
}

fn flush_table(elements: &mut Vec<ContentElement>, table_lines: &mut Vec<&str>) {
    match parse_table(table_lines) {
        Some(rows) => elements.push(ContentElement::TableBlock(rows)),
        None => warn!(
            "dropping unparseable table run of {} line(s)",
            table_lines.len()
        ),
    }
    table_lines.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_table_like() {
        assert!(is_table_like("| A | B |"));
        assert!(is_table_like("|---|---|"));
        assert!(!is_table_like("just prose"));
        // Pipe alone is not sufficient
        assert!(!is_table_like("| | |"));
    }

    #[test]
    fn test_prose_only() {
        let elements = extract_elements("one\ntwo");
        assert_eq!(elements, vec![ContentElement::Text("one\ntwo".to_string())]);
    }

    #[test]
    fn test_table_between_prose() {
        let elements = extract_elements("intro\n| A | B |\n|---|---|\n| 1 | 2 |\noutro");
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], ContentElement::Text("intro".to_string()));
        match &elements[1] {
            ContentElement::TableBlock(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0], vec!["A", "B"]);
                assert_eq!(rows[1], vec!["1", "2"]);
            }
            other => panic!("expected table, got {other:?}"),
        }
        assert_eq!(elements[2], ContentElement::Text("outro".to_string()));
    }

    #[test]
    fn test_table_at_end_of_input() {
        let elements = extract_elements("intro\n| A | B |\n| 1 | 2 |");
        assert_eq!(elements.len(), 2);
        assert!(matches!(elements[1], ContentElement::TableBlock(_)));
    }

    #[test]
    fn test_degenerate_table_dropped() {
        // Header-only run yields no TableBlock and is not re-emitted
        let elements = extract_elements("before\n| only | header |\nafter");
        assert_eq!(
            elements,
            vec![
                ContentElement::Text("before".to_string()),
                ContentElement::Text("after".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        // A single empty line is still a prose run
        let elements = extract_elements("");
        assert_eq!(elements, vec![ContentElement::Text(String::new())]);
    }
}
