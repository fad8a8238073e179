//! Markdown table parsing.
//!
//! Converts a contiguous run of table-like lines into a grid of cell
//! strings, dropping separator rows.

/// A row is a separator iff every non-empty cell consists solely of
/// dashes and spaces. A row with no non-empty cells also counts.
fn is_separator_row(cells: &[String]) -> bool {
    cells
        .iter()
        .filter(|cell| !cell.is_empty())
        .all(|cell| cell.chars().all(|c| c == '-' || c == ' '))
}

fn split_row(line: &str) -> Vec<String> {
    let mut line = line;
    if let Some(stripped) = line.strip_prefix('|') {
        line = stripped;
    }
    if let Some(stripped) = line.strip_suffix('|') {
        line = stripped;
    }
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Parse a run of table-like lines into a grid.
///
/// Returns `None` when fewer than two rows survive separator removal
/// (a table needs at least a header and one data row). The first
/// surviving row is the header.
pub fn parse_table(lines: &[&str]) -> Option<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    for line in lines {
        if !line.contains('|') {
            continue;
        }
        let cells = split_row(line);
        if !is_separator_row(&cells) {
            rows.push(cells);
        }
    }

    if rows.len() >= 2 {
        Some(rows)
    } else {
        None
    }
}
