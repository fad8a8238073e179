//! Page composition (pass 1 of the two-pass renderer).
//!
//! Flows the assembled block sequence top-down through the A4 content
//! frame and records one [`PageSnapshot`] per page. Snapshots carry only
//! page content; headers and footers are stamped in pass 2 once the
//! total page count is known.

use crate::layout::{CellAlign, TableLayout};
use crate::model::{Inline, TextRun};
use crate::style::{Rgb, StyleSheet};

use super::assembler::{Align, DocBlock, ParagraphBlock};
use super::metrics::{self, Atom, Font, WrappedLine};

/// A primitive drawing operation in page coordinates (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        color: Rgb,
        /// Extra spacing applied per space character (justification).
        word_spacing: f64,
        text: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgb,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Option<Rgb>,
        stroke: Option<Stroke>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgb,
}

/// Captured content of one page, append-only during pass 1 and
/// read-only during pass 2. Snapshot `i` becomes physical page `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    pub ops: Vec<DrawOp>,
}

struct CellLines {
    lines: Vec<WrappedLine>,
    align: CellAlign,
    header: bool,
}

struct RowLines {
    height: f64,
    cells: Vec<CellLines>,
}

/// Flows blocks into page snapshots.
pub struct LayoutEngine<'a> {
    style: &'a StyleSheet,
    snapshots: Vec<PageSnapshot>,
    ops: Vec<DrawOp>,
    y: f64,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(style: &'a StyleSheet) -> Self {
        Self {
            style,
            snapshots: Vec::new(),
            ops: Vec::new(),
            y: style.page_height - style.margin_top,
        }
    }

    /// Lay out the whole block sequence and return the page snapshots.
    pub fn run(mut self, blocks: &[DocBlock]) -> Vec<PageSnapshot> {
        for block in blocks {
            match block {
                DocBlock::Spacer(h) => self.y -= h,
                DocBlock::Rule { thickness, color } => self.rule(*thickness, *color),
                DocBlock::Paragraph(p) => self.paragraph(p),
                DocBlock::Table(t) => self.table(t),
                DocBlock::Conclusion(text) => self.conclusion(text),
                DocBlock::PageBreak => {
                    if !self.ops.is_empty() {
                        self.break_page();
                    }
                }
            }
        }
        if !self.ops.is_empty() {
            self.break_page();
        }
        self.snapshots
    }

    fn top(&self) -> f64 {
        self.style.page_height - self.style.margin_top
    }

    fn break_page(&mut self) {
        self.snapshots.push(PageSnapshot {
            ops: std::mem::take(&mut self.ops),
        });
        self.y = self.top();
    }

    /// Start a fresh page unless the current one is still empty.
    fn fresh_page(&mut self) {
        if !self.ops.is_empty() {
            self.break_page();
        } else {
            self.y = self.top();
        }
    }

    fn ensure(&mut self, height: f64) {
        if self.y - height < self.style.margin_bottom {
            self.fresh_page();
        }
    }

    fn rule(&mut self, thickness: f64, color: Rgb) {
        self.ensure(thickness);
        let y = self.y - thickness / 2.0;
        self.ops.push(DrawOp::Line {
            x1: self.style.margin_left,
            y1: y,
            x2: self.style.page_width - self.style.margin_right,
            y2: y,
            width: thickness,
            color,
        });
        self.y -= thickness;
    }

    fn paragraph(&mut self, p: &ParagraphBlock) {
        self.y -= p.space_before;
        for visual in split_lines(&p.spans) {
            if visual.is_empty() {
                self.ensure(p.leading);
                self.y -= p.leading;
                continue;
            }
            let atoms = resolve_atoms(&visual, p);
            let wrapped = metrics::wrap_atoms(&atoms, self.style.content_width());
            let last_idx = wrapped.len() - 1;
            for (i, line) in wrapped.iter().enumerate() {
                self.ensure(p.leading);
                self.y -= p.leading;
                let baseline = self.y + 0.2 * p.size;
                self.emit_line(line, baseline, p.align, i == last_idx);
            }
        }
        self.y -= p.space_after;
    }

    fn emit_line(&mut self, line: &WrappedLine, baseline: f64, align: Align, last: bool) {
        if line.is_empty() {
            return;
        }
        let width = metrics::line_width(line);
        let avail = self.style.content_width();
        let mut x = self.style.margin_left;
        let mut word_spacing = 0.0;
        match align {
            Align::Left => {}
            Align::Center => x += (avail - width).max(0.0) / 2.0,
            Align::Justify => {
                let spaces = metrics::line_space_count(line);
                if !last && spaces > 0 && width < avail {
                    word_spacing = (avail - width) / spaces as f64;
                }
            }
        }
        for piece in line {
            let spaces = piece.text.chars().filter(|&c| c == ' ').count();
            self.ops.push(DrawOp::Text {
                x,
                y: baseline,
                font: piece.font,
                size: piece.size,
                color: piece.color,
                word_spacing,
                text: piece.text.clone(),
            });
            x += piece.width + word_spacing * spaces as f64;
        }
    }

    fn table(&mut self, table: &TableLayout) {
        if table.rows.is_empty() {
            return;
        }
        let widths = &table.column_widths;
        let total_width: f64 = widths.iter().sum();
        // Wide tables are centered on the page (near-full bleed)
        let x0 = (self.style.page_width - total_width) / 2.0;

        let rows: Vec<RowLines> = table
            .rows
            .iter()
            .map(|row| self.layout_row(row, widths))
            .collect();

        for (i, row) in rows.iter().enumerate() {
            if self.y - row.height < self.style.margin_bottom {
                self.fresh_page();
                // Header row repeats after a split
                if i > 0 {
                    self.draw_row(&rows[0], 0, x0, widths, total_width);
                }
            }
            self.draw_row(row, i, x0, widths, total_width);
        }
    }

    fn layout_row(&self, row: &[crate::layout::LayoutCell], widths: &[f64]) -> RowLines {
        let style = self.style;
        let mut cells = Vec::with_capacity(row.len());
        let mut max_lines = 1usize;

        for (col, cell) in row.iter().enumerate() {
            let Some(&col_width) = widths.get(col) else {
                // Extra cells beyond the header's column count are ignored
                break;
            };
            let (font, size) = if cell.header {
                (Font::HelveticaBold, style.table_header_size)
            } else {
                (Font::Helvetica, style.table_cell_size)
            };
            let color = if cell.header {
                Rgb::WHITE
            } else {
                style.ink
            };
            let inner = (col_width - 2.0 * style.table_cell_side_padding).max(1.0);
            let atoms = plain_atoms(&cell.text, font, size, color, style);
            let lines = metrics::wrap_atoms(&atoms, inner);
            max_lines = max_lines.max(lines.len());
            cells.push(CellLines {
                lines,
                align: cell.align,
                header: cell.header,
            });
        }

        let (leading, vpad) = if row.first().map(|c| c.header).unwrap_or(false) {
            (
                style.table_header_leading,
                style.table_header_vertical_padding,
            )
        } else {
            (style.table_cell_leading, style.table_cell_vertical_padding)
        };

        RowLines {
            height: max_lines as f64 * leading + 2.0 * vpad,
            cells,
        }
    }

    fn draw_row(
        &mut self,
        row: &RowLines,
        row_idx: usize,
        x0: f64,
        widths: &[f64],
        total_width: f64,
    ) {
        let style = self.style;
        let row_top = self.y;
        let row_bottom = row_top - row.height;
        let is_header = row_idx == 0;

        // Background: navy header, zebra body (white / light grey)
        if is_header {
            self.ops.push(DrawOp::Rect {
                x: x0,
                y: row_bottom,
                w: total_width,
                h: row.height,
                fill: Some(style.navy),
                stroke: None,
            });
        } else if (row_idx - 1) % 2 == 1 {
            self.ops.push(DrawOp::Rect {
                x: x0,
                y: row_bottom,
                w: total_width,
                h: row.height,
                fill: Some(style.zebra),
                stroke: None,
            });
        }

        let (leading, vpad, size) = if is_header {
            (
                style.table_header_leading,
                style.table_header_vertical_padding,
                style.table_header_size,
            )
        } else {
            (
                style.table_cell_leading,
                style.table_cell_vertical_padding,
                style.table_cell_size,
            )
        };

        let mut cx = x0;
        for (col, cell) in row.cells.iter().enumerate() {
            let col_width = widths[col];

            // Cell grid
            self.ops.push(DrawOp::Rect {
                x: cx,
                y: row_bottom,
                w: col_width,
                h: row.height,
                fill: None,
                stroke: Some(Stroke {
                    width: 0.5,
                    color: style.table_grid,
                }),
            });

            let text_top = row_top - vpad;
            for (k, line) in cell.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let line_width = metrics::line_width(line);
                let inner = col_width - 2.0 * style.table_cell_side_padding;
                let mut x = cx + style.table_cell_side_padding;
                if cell.align == CellAlign::Center {
                    x += (inner - line_width).max(0.0) / 2.0;
                }
                let baseline = text_top - (k + 1) as f64 * leading + 0.2 * size;
                for piece in line {
                    self.ops.push(DrawOp::Text {
                        x,
                        y: baseline,
                        font: piece.font,
                        size: piece.size,
                        color: piece.color,
                        word_spacing: 0.0,
                        text: piece.text.clone(),
                    });
                    x += piece.width;
                }
            }

            cx += col_width;
        }

        // Accent rule under the header row
        if is_header {
            self.ops.push(DrawOp::Line {
                x1: x0,
                y1: row_bottom,
                x2: x0 + total_width,
                y2: row_bottom,
                width: 1.0,
                color: style.navy,
            });
        }

        self.y = row_bottom;
    }

    fn conclusion(&mut self, text: &str) {
        let style = self.style;
        let box_width = style.conclusion_width;
        let x0 = (style.page_width - box_width) / 2.0;
        let inner = box_width - 2.0 * style.conclusion_side_padding;
        let size = style.body_size;
        let leading = 14.0;

        let mut atoms = vec![Atom {
            text: "Conclusion: ".to_string(),
            font: Font::HelveticaBold,
            size,
            color: style.navy,
        }];
        atoms.extend(plain_atoms(text, Font::Helvetica, size, style.navy, style));
        let wrapped = metrics::wrap_atoms(&atoms, inner);

        let height =
            wrapped.len() as f64 * leading + 2.0 * style.conclusion_vertical_padding;
        // The call-out is kept together rather than split across pages
        self.ensure(height);

        let box_top = self.y;
        let box_bottom = box_top - height;
        self.ops.push(DrawOp::Rect {
            x: x0,
            y: box_bottom,
            w: box_width,
            h: height,
            fill: Some(style.conclusion_fill),
            stroke: Some(Stroke {
                width: 1.0,
                color: style.conclusion_border,
            }),
        });

        let text_top = box_top - style.conclusion_vertical_padding;
        for (k, line) in wrapped.iter().enumerate() {
            let mut x = x0 + style.conclusion_side_padding;
            let baseline = text_top - (k + 1) as f64 * leading + 0.2 * size;
            for piece in line {
                self.ops.push(DrawOp::Text {
                    x,
                    y: baseline,
                    font: piece.font,
                    size: piece.size,
                    color: piece.color,
                    word_spacing: 0.0,
                    text: piece.text.clone(),
                });
                x += piece.width;
            }
        }

        self.y = box_bottom;
    }
}

fn split_lines(spans: &[Inline]) -> Vec<Vec<&TextRun>> {
    let mut lines: Vec<Vec<&TextRun>> = vec![Vec::new()];
    for span in spans {
        match span {
            Inline::Run(run) => lines.last_mut().unwrap().push(run),
            Inline::LineBreak => lines.push(Vec::new()),
        }
    }
    lines
}

fn resolve_atoms(runs: &[&TextRun], p: &ParagraphBlock) -> Vec<Atom> {
    let mut atoms = Vec::with_capacity(runs.len());
    for run in runs {
        let bold = p.bold || run.style.bold;
        let italic = p.italic || run.style.italic;
        let font = if is_dingbat_run(&run.text) {
            Font::ZapfDingbats
        } else if run.style.code {
            Font::CourierBold
        } else {
            match (bold, italic) {
                (true, true) => Font::HelveticaBoldOblique,
                (true, false) => Font::HelveticaBold,
                (false, true) => Font::HelveticaOblique,
                (false, false) => Font::Helvetica,
            }
        };
        atoms.push(Atom {
            text: run.text.clone(),
            font,
            size: run.style.size.unwrap_or(p.size),
            color: run.style.color.unwrap_or(p.color),
        });
    }
    atoms
}

fn is_dingbat_char(c: char) -> bool {
    matches!(c, '✓' | '✔' | '✖' | '✗')
}

fn is_dingbat_run(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_dingbat_char)
}

/// Atoms for plain text with check/cross glyphs routed to ZapfDingbats.
fn plain_atoms(text: &str, font: Font, size: f64, color: Rgb, style: &StyleSheet) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let mut buf = String::new();
    for c in text.chars() {
        if is_dingbat_char(c) {
            if !buf.is_empty() {
                atoms.push(Atom {
                    text: std::mem::take(&mut buf),
                    font,
                    size,
                    color,
                });
            }
            let glyph_color = match c {
                '✓' | '✔' => style.success,
                _ => style.failure,
            };
            atoms.push(Atom {
                text: c.to_string(),
                font: Font::ZapfDingbats,
                size,
                color: glyph_color,
            });
        } else {
            buf.push(c);
        }
    }
    if !buf.is_empty() {
        atoms.push(Atom {
            text: buf,
            font,
            size,
            color,
        });
    }
    atoms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StyleSheet {
        StyleSheet::default()
    }

    fn body_paragraph(text: &str) -> ParagraphBlock {
        let s = style();
        ParagraphBlock {
            spans: vec![Inline::Run(TextRun::new(text))],
            size: s.body_size,
            leading: s.body_leading,
            align: Align::Justify,
            color: s.ink,
            space_before: 6.0,
            space_after: 12.0,
            bold: false,
            italic: false,
        }
    }

    #[test]
    fn test_single_paragraph_one_page() {
        let s = style();
        let blocks = vec![DocBlock::Paragraph(body_paragraph("hello world"))];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text.contains("hello"))));
    }

    #[test]
    fn test_page_break_splits_snapshots() {
        let s = style();
        let blocks = vec![
            DocBlock::Paragraph(body_paragraph("cover")),
            DocBlock::PageBreak,
            DocBlock::Paragraph(body_paragraph("content")),
        ];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        assert_eq!(snapshots.len(), 2);
    }

    #[test]
    fn test_long_content_overflows_to_next_page() {
        let s = style();
        // Enough paragraphs to exceed one A4 content frame
        let blocks: Vec<DocBlock> = (0..60)
            .map(|i| DocBlock::Paragraph(body_paragraph(&format!("paragraph number {i}"))))
            .collect();
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        assert!(snapshots.len() >= 2);
    }

    #[test]
    fn test_snapshot_has_no_decorations() {
        // Pass 1 must not draw header/footer text
        let s = style();
        let blocks = vec![DocBlock::Paragraph(body_paragraph("body"))];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        for op in &snapshots[0].ops {
            if let DrawOp::Text { text, .. } = op {
                assert!(!text.contains("Page "));
            }
        }
    }

    #[test]
    fn test_centered_line_offset() {
        let s = style();
        let mut p = body_paragraph("tiny");
        p.align = Align::Center;
        let blocks = vec![DocBlock::Paragraph(p)];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        let DrawOp::Text { x, .. } = &snapshots[0].ops[0] else {
            panic!("expected text op");
        };
        assert!(*x > s.margin_left);
    }

    #[test]
    fn test_justified_word_spacing() {
        let s = style();
        // A line long enough to wrap: first wrapped line gets word spacing
        let long = "word ".repeat(60);
        let blocks = vec![DocBlock::Paragraph(body_paragraph(long.trim()))];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        let spaced = snapshots[0].ops.iter().any(
            |op| matches!(op, DrawOp::Text { word_spacing, .. } if *word_spacing > 0.0),
        );
        assert!(spaced);
    }

    #[test]
    fn test_table_draws_header_background_and_rule() {
        let s = style();
        let engine = crate::layout::TableLayoutEngine::new(&s);
        let layout = engine.layout(&[
            vec!["Name".to_string(), "Count".to_string()],
            vec!["alpha".to_string(), "2".to_string()],
        ]);
        let blocks = vec![DocBlock::Table(layout)];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        let ops = &snapshots[0].ops;
        assert!(ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { fill: Some(c), .. } if *c == s.navy)));
        assert!(ops
            .iter()
            .any(|op| matches!(op, DrawOp::Line { color, width, .. } if *color == s.navy && *width == 1.0)));
    }

    #[test]
    fn test_conclusion_box_fill_and_label() {
        let s = style();
        let blocks = vec![DocBlock::Conclusion("all targets met".to_string())];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        let ops = &snapshots[0].ops;
        assert!(ops.iter().any(
            |op| matches!(op, DrawOp::Rect { fill: Some(c), .. } if *c == s.conclusion_fill)
        ));
        assert!(ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, font, .. } if text.starts_with("Conclusion:") && *font == Font::HelveticaBold)
        ));
    }

    #[test]
    fn test_dingbat_routing() {
        let s = style();
        let atoms = plain_atoms("ok ✓ bad ✗", Font::Helvetica, 10.0, s.ink, &s);
        let dingbats: Vec<_> = atoms
            .iter()
            .filter(|a| a.font == Font::ZapfDingbats)
            .collect();
        assert_eq!(dingbats.len(), 2);
        assert_eq!(dingbats[0].color, s.success);
        assert_eq!(dingbats[1].color, s.failure);
    }

    #[test]
    fn test_rule_spans_content_width() {
        let s = style();
        let blocks = vec![DocBlock::Rule {
            thickness: 1.0,
            color: s.light_rule,
        }];
        let snapshots = LayoutEngine::new(&s).run(&blocks);
        let DrawOp::Line { x1, x2, .. } = &snapshots[0].ops[0] else {
            panic!("expected line op");
        };
        assert_eq!(*x1, s.margin_left);
        assert_eq!(*x2, s.page_width - s.margin_right);
    }
}
