//! Page decoration (pass 2 of the two-pass renderer).
//!
//! Once pass 1 has produced the full snapshot list, every page gets its
//! header label, footer date, and an exact `Page N of M` marker. The
//! decoration is a pure function of the snapshot and the page counts.

use crate::style::StyleSheet;

use super::engine::{DrawOp, PageSnapshot};
use super::metrics::{self, Font};

/// Decorate one snapshot into the final operation list for its page.
///
/// `index` is zero-based; `total` is the number of pages in the
/// document. The input snapshot is not mutated.
pub fn decorate_page(
    snapshot: &PageSnapshot,
    index: usize,
    total: usize,
    header_text: &str,
    date_text: &str,
    style: &StyleSheet,
) -> Vec<DrawOp> {
    let mut ops = snapshot.ops.clone();
    let cm = crate::style::CM;

    // Header label and hairline rule
    ops.push(DrawOp::Text {
        x: 2.0 * cm,
        y: style.page_height - 1.3 * cm,
        font: Font::Helvetica,
        size: 10.0,
        color: style.grey,
        word_spacing: 0.0,
        text: header_text.to_string(),
    });
    ops.push(DrawOp::Line {
        x1: 2.0 * cm,
        y1: style.page_height - 1.5 * cm,
        x2: style.page_width - 2.0 * cm,
        y2: style.page_height - 1.5 * cm,
        width: 0.5,
        color: style.light_rule,
    });

    // Footer: generation date left, page marker centered
    ops.push(DrawOp::Text {
        x: 2.0 * cm,
        y: 1.0 * cm,
        font: Font::Helvetica,
        size: 9.0,
        color: style.grey,
        word_spacing: 0.0,
        text: date_text.to_string(),
    });
    let marker = format!("Page {} of {}", index + 1, total);
    let marker_width = metrics::text_width(&marker, Font::Helvetica, 9.0);
    ops.push(DrawOp::Text {
        x: (style.page_width - marker_width) / 2.0,
        y: 1.0 * cm,
        font: Font::Helvetica,
        size: 9.0,
        color: style.grey,
        word_spacing: 0.0,
        text: marker,
    });

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PageSnapshot {
        PageSnapshot { ops: Vec::new() }
    }

    #[test]
    fn test_page_marker_counts() {
        let style = StyleSheet::default();
        let ops = decorate_page(&snapshot(), 1, 3, "Report", "August 25, 2026", &style);
        assert!(ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text == "Page 2 of 3")
        ));
    }

    #[test]
    fn test_header_and_date_present() {
        let style = StyleSheet::default();
        let ops = decorate_page(
            &snapshot(),
            0,
            1,
            "Measurability Assessment Report",
            "August 25, 2026",
            &style,
        );
        assert!(ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text == "Measurability Assessment Report")
        ));
        assert!(ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text == "August 25, 2026")
        ));
    }

    #[test]
    fn test_snapshot_left_untouched() {
        let style = StyleSheet::default();
        let snap = snapshot();
        let _ = decorate_page(&snap, 0, 1, "h", "d", &style);
        assert!(snap.ops.is_empty());
    }

    #[test]
    fn test_marker_is_centered() {
        let style = StyleSheet::default();
        let ops = decorate_page(&snapshot(), 0, 1, "h", "d", &style);
        let marker = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, .. } if text.starts_with("Page ") => Some((*x, text)),
                _ => None,
            })
            .unwrap();
        let width = metrics::text_width(marker.1, Font::Helvetica, 9.0);
        assert!((marker.0 + width / 2.0 - style.page_width / 2.0).abs() < 1e-6);
    }
}
