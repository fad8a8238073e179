//! Table layout computation.
//!
//! Derives per-column widths from cell content and assigns per-cell
//! alignment, producing a [`TableLayout`] ready for page rendering.
//!
//! Widths use a floor-then-rescale scheme: every column gets at least
//! the nominal minimum, then all widths are scaled so they sum exactly
//! to the available width. The final rescale can push a floored column
//! back below the minimum; only the width sum is a contract.

use regex::Regex;

use crate::style::StyleSheet;

/// Horizontal alignment of a laid-out cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
}

/// One styled cell of a laid-out table.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCell {
    pub text: String,
    pub align: CellAlign,
    /// Header cells render bold, centered, reversed-color.
    pub header: bool,
}

/// A table with derived column widths. Row 0 is the header.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Per-column widths in points; sums to the available table width.
    pub column_widths: Vec<f64>,
    pub rows: Vec<Vec<LayoutCell>>,
}

impl TableLayout {
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }
}

/// Computes [`TableLayout`]s for one build.
pub struct TableLayoutEngine {
    numeric: Regex,
    available_width: f64,
    min_width: f64,
}

impl TableLayoutEngine {
    pub fn new(style: &StyleSheet) -> Self {
        Self {
            // Digits, whitespace, comma, period, hyphen only
            numeric: Regex::new(r"^[\d\s,.\-]+$").unwrap(),
            available_width: style.table_width(),
            min_width: style.min_column_width,
        }
    }

    /// Lay out a parsed cell grid. Column count follows the header row;
    /// longer or shorter body rows are accepted as-is.
    pub fn layout(&self, grid: &[Vec<String>]) -> TableLayout {
        let num_cols = grid.first().map(|r| r.len()).unwrap_or(0).max(1);

        let mut content_lengths = vec![0usize; num_cols];
        for row in grid {
            for (col, cell) in row.iter().enumerate().take(num_cols) {
                let len = cell.trim().chars().count();
                if len > content_lengths[col] {
                    content_lengths[col] = len;
                }
            }
        }

        let weight_total: usize = content_lengths.iter().sum();
        let mut widths: Vec<f64> = content_lengths
            .iter()
            .map(|&len| {
                if weight_total > 0 {
                    let proportional =
                        len as f64 / weight_total as f64 * self.available_width;
                    proportional.max(self.min_width)
                } else {
                    self.available_width / num_cols as f64
                }
            })
            .collect();

        // Floors make the sum overshoot; rescale to the exact target
        let total: f64 = widths.iter().sum();
        if (total - self.available_width).abs() > f64::EPSILON {
            let scale = self.available_width / total;
            for w in widths.iter_mut() {
                *w *= scale;
            }
        }

        let rows = grid
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row.iter()
                    .enumerate()
                    .map(|(col_idx, cell)| self.style_cell(cell, row_idx, col_idx))
                    .collect()
            })
            .collect();

        TableLayout {
            column_widths: widths,
            rows,
        }
    }

    fn style_cell(&self, cell: &str, row_idx: usize, col_idx: usize) -> LayoutCell {
        let text = cell.trim().to_string();
        if row_idx == 0 {
            return LayoutCell {
                text,
                align: CellAlign::Center,
                header: true,
            };
        }
        let is_numeric = !text.is_empty() && self.numeric.is_match(&text);
        LayoutCell {
            align: if is_numeric && col_idx > 0 {
                CellAlign::Center
            } else {
                CellAlign::Left
            },
            text,
            header: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn engine() -> TableLayoutEngine {
        TableLayoutEngine::new(&StyleSheet::default())
    }

    #[test]
    fn test_widths_sum_to_available_width() {
        let engine = engine();
        let layout = engine.layout(&grid(&[
            &["Indicator", "Target", "Met"],
            &["Water quality compliance percentage", "95", "✓"],
        ]));
        let sum: f64 = layout.column_widths.iter().sum();
        assert!((sum - engine.available_width).abs() < 1e-6);
    }

    #[test]
    fn test_widths_proportional_to_content() {
        let layout = engine().layout(&grid(&[
            &["A", "B"],
            &["a much longer cell of text", "9"],
        ]));
        assert!(layout.column_widths[0] > layout.column_widths[1]);
    }

    #[test]
    fn test_empty_cells_split_evenly() {
        let engine = engine();
        let layout = engine.layout(&grid(&[&["", ""], &["", ""]]));
        assert!((layout.column_widths[0] - layout.column_widths[1]).abs() < 1e-9);
        let sum: f64 = layout.column_widths.iter().sum();
        assert!((sum - engine.available_width).abs() < 1e-6);
    }

    #[test]
    fn test_floor_then_rescale_can_undershoot_floor() {
        // Ten columns at the 2cm floor cannot all keep it once rescaled
        let engine = engine();
        let header: Vec<&str> = vec!["x"; 12];
        let mut wide = vec!["x"; 12];
        wide[0] = "an extremely long descriptive narrative cell dominating the weight budget";
        let layout = engine.layout(&grid(&[&header, &wide]));
        let sum: f64 = layout.column_widths.iter().sum();
        assert!((sum - engine.available_width).abs() < 1e-6);
        assert!(layout
            .column_widths
            .iter()
            .skip(1)
            .any(|&w| w < engine.min_width));
    }

    #[test]
    fn test_header_row_styling() {
        let layout = engine().layout(&grid(&[&["Name", "Count"], &["row", "2"]]));
        assert!(layout.rows[0].iter().all(|c| c.header));
        assert!(layout.rows[0]
            .iter()
            .all(|c| c.align == CellAlign::Center));
    }

    #[test]
    fn test_numeric_cells_centered_except_first_column() {
        let layout = engine().layout(&grid(&[
            &["ID", "Total", "Note"],
            &["1,200", "3.5", "text"],
        ]));
        let body = &layout.rows[1];
        // Numeric but first column: left
        assert_eq!(body[0].align, CellAlign::Left);
        // Numeric elsewhere: centered
        assert_eq!(body[1].align, CellAlign::Center);
        // Plain text: left
        assert_eq!(body[2].align, CellAlign::Left);
    }

    #[test]
    fn test_uneven_rows_accepted() {
        let layout = engine().layout(&grid(&[&["A", "B"], &["1", "2", "3"]]));
        assert_eq!(layout.column_count(), 2);
        assert_eq!(layout.rows[1].len(), 3);
    }
}
