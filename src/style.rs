//! Styling constants for the generated report.
//!
//! All colors, fonts, margins, and page geometry live in a single
//! immutable [`StyleSheet`] value, constructed once per build and passed
//! explicitly to the components that need it.

/// Points per centimeter.
pub const CM: f64 = 28.346_457;

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Create a color from a `0xRRGGBB` value.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as f32 / 255.0,
            g: ((value >> 8) & 0xFF) as f32 / 255.0,
            b: (value & 0xFF) as f32 / 255.0,
        }
    }

    pub const WHITE: Rgb = Rgb::hex(0xFFFFFF);
    pub const BLACK: Rgb = Rgb::hex(0x000000);
}

/// Immutable style configuration for one report build.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    // Page geometry (points, A4)
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,

    // Palette
    pub navy: Rgb,
    pub blue: Rgb,
    pub subhead: Rgb,
    pub ink: Rgb,
    pub grey: Rgb,
    pub notice_grey: Rgb,
    pub light_rule: Rgb,
    pub table_grid: Rgb,
    pub zebra: Rgb,
    pub conclusion_fill: Rgb,
    pub conclusion_border: Rgb,
    pub success: Rgb,
    pub failure: Rgb,

    // Body typography
    pub body_size: f64,
    pub body_leading: f64,

    // Table typography and geometry
    pub table_header_size: f64,
    pub table_header_leading: f64,
    pub table_cell_size: f64,
    pub table_cell_leading: f64,
    /// Fraction of the page width a table may occupy.
    pub table_width_ratio: f64,
    /// Nominal minimum column width (not guaranteed after rescaling).
    pub min_column_width: f64,
    pub table_cell_side_padding: f64,
    pub table_header_vertical_padding: f64,
    pub table_cell_vertical_padding: f64,

    // Conclusion call-out
    pub conclusion_width: f64,
    pub conclusion_side_padding: f64,
    pub conclusion_vertical_padding: f64,
}

impl StyleSheet {
    /// Horizontal span available for flowed content.
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Width budget for tables (95% of the page width, near-full bleed).
    pub fn table_width(&self) -> f64 {
        self.page_width * self.table_width_ratio
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            page_width: 595.276,
            page_height: 841.89,
            margin_left: 0.5 * CM,
            margin_right: 0.5 * CM,
            margin_top: 1.8 * CM,
            margin_bottom: 1.5 * CM,

            navy: Rgb::hex(0x003366),
            blue: Rgb::hex(0x004C99),
            subhead: Rgb::hex(0x333333),
            ink: Rgb::hex(0x1A1A1A),
            grey: Rgb::hex(0x666666),
            notice_grey: Rgb::hex(0x999999),
            light_rule: Rgb::hex(0xD0D0D0),
            table_grid: Rgb::hex(0xD9D9D9),
            zebra: Rgb::hex(0xF8F8F8),
            conclusion_fill: Rgb::hex(0xE9F3FF),
            conclusion_border: Rgb::hex(0xBBD4EE),
            success: Rgb::hex(0x008000),
            failure: Rgb::hex(0xCC0000),

            body_size: 11.0,
            body_leading: 16.0,

            table_header_size: 11.0,
            table_header_leading: 14.0,
            table_cell_size: 10.0,
            table_cell_leading: 13.0,
            table_width_ratio: 0.95,
            min_column_width: 2.0 * CM,
            table_cell_side_padding: 8.0,
            table_header_vertical_padding: 8.0,
            table_cell_vertical_padding: 6.0,

            conclusion_width: 17.0 * CM,
            conclusion_side_padding: 14.0,
            conclusion_vertical_padding: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        let navy = Rgb::hex(0x003366);
        assert_eq!(navy.r, 0.0);
        assert!((navy.g - 0x33 as f32 / 255.0).abs() < 1e-6);
        assert!((navy.b - 0x66 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_table_width_is_95_percent() {
        let style = StyleSheet::default();
        assert!((style.table_width() - style.page_width * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_content_width_positive() {
        let style = StyleSheet::default();
        assert!(style.content_width() > 0.0);
        assert!(style.content_width() < style.page_width);
    }
}
