//! Font metrics and text wrapping for the base-14 fonts.
//!
//! Widths are AFM advance widths in thousandths of an em. Only the
//! faces the report actually uses are carried: the Helvetica family for
//! body text, Courier-Bold for code spans, and ZapfDingbats for the
//! check/cross glyphs.

use crate::style::Rgb;

/// A base-14 font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    CourierBold,
    ZapfDingbats,
}

impl Font {
    pub const ALL: [Font; 6] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::HelveticaBoldOblique,
        Font::CourierBold,
        Font::ZapfDingbats,
    ];

    /// PostScript base font name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::CourierBold => "Courier-Bold",
            Font::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Resource dictionary key.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::HelveticaBoldOblique => "F4",
            Font::CourierBold => "F5",
            Font::ZapfDingbats => "F6",
        }
    }
}

/// Helvetica advance widths for ASCII 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // A..P
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // Q..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // a..p
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // q..z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold advance widths for ASCII 32..=126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611,
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Advance width of one character in thousandths of an em.
pub fn char_width(font: Font, c: char) -> u16 {
    match font {
        Font::CourierBold => 600,
        Font::ZapfDingbats => dingbat_width(c),
        Font::Helvetica | Font::HelveticaOblique => ascii_width(&HELVETICA, c),
        Font::HelveticaBold | Font::HelveticaBoldOblique => ascii_width(&HELVETICA_BOLD, c),
    }
}

fn ascii_width(table: &[u16; 95], c: char) -> u16 {
    match c {
        ' '..='~' => table[c as usize - 32],
        '•' => 350,
        '–' => 556,
        '—' => 1000,
        // Unmapped characters degrade to '?' at emission time
        _ => 556,
    }
}

fn dingbat_width(c: char) -> u16 {
    match c {
        '✓' => 549,
        '✔' => 576,
        '✖' => 624,
        '✗' => 521,
        _ => 600,
    }
}

/// Width of a string at the given size, in points.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    units as f64 * size / 1000.0
}

/// A resolved run ready for wrapping: style decisions are already made.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub text: String,
    pub font: Font,
    pub size: f64,
    pub color: Rgb,
}

/// A measured fragment positioned on one wrapped line.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub text: String,
    pub font: Font,
    pub size: f64,
    pub color: Rgb,
    pub width: f64,
}

/// One wrapped line of pieces.
pub type WrappedLine = Vec<Piece>;

/// Total advance width of a wrapped line.
pub fn line_width(line: &WrappedLine) -> f64 {
    line.iter().map(|p| p.width).sum()
}

/// Number of space characters on a line (justification divisor).
pub fn line_space_count(line: &WrappedLine) -> usize {
    line.iter()
        .map(|p| p.text.chars().filter(|&c| c == ' ').count())
        .sum()
}

#[derive(Clone)]
struct Token {
    text: String,
    font: Font,
    size: f64,
    color: Rgb,
    width: f64,
    is_space: bool,
}

/// Greedy word wrap over styled atoms.
///
/// Leading whitespace of the first line is preserved (list indentation
/// depends on it); spaces are dropped at wrap points.
pub fn wrap_atoms(atoms: &[Atom], max_width: f64) -> Vec<WrappedLine> {
    let tokens = tokenize(atoms);
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut current_width = 0.0;
    let mut at_start = true;

    for token in tokens {
        if token.is_space && !at_start && current.is_empty() && !lines.is_empty() {
            // Space at a wrap point
            continue;
        }
        if !token.is_space
            && current_width + token.width > max_width
            && !current.is_empty()
        {
            // Break before this word; spaces left dangling at the break
            // would skew justification
            while current.last().map(|t| t.is_space).unwrap_or(false) {
                current.pop();
            }
            if !current.is_empty() {
                lines.push(merge(&current));
            }
            current.clear();
            current_width = 0.0;
        }
        at_start = false;
        current_width += token.width;
        current.push(token);
    }

    if !current.is_empty() {
        lines.push(merge(&current));
    }
    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

fn tokenize(atoms: &[Atom]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for atom in atoms {
        let mut word = String::new();
        for c in atom.text.chars() {
            if c == ' ' {
                if !word.is_empty() {
                    tokens.push(make_token(atom, std::mem::take(&mut word), false));
                }
                tokens.push(make_token(atom, " ".to_string(), true));
            } else {
                word.push(c);
            }
        }
        if !word.is_empty() {
            tokens.push(make_token(atom, word, false));
        }
    }
    tokens
}

fn make_token(atom: &Atom, text: String, is_space: bool) -> Token {
    let width = text_width(&text, atom.font, atom.size);
    Token {
        text,
        font: atom.font,
        size: atom.size,
        color: atom.color,
        width,
        is_space,
    }
}

/// Merge adjacent same-style tokens into pieces.
fn merge(tokens: &[Token]) -> WrappedLine {
    let mut pieces: Vec<Piece> = Vec::new();
    for token in tokens {
        if let Some(last) = pieces.last_mut() {
            if last.font == token.font && last.size == token.size && last.color == token.color {
                last.text.push_str(&token.text);
                last.width += token.width;
                continue;
            }
        }
        pieces.push(Piece {
            text: token.text.clone(),
            font: token.font,
            size: token.size,
            color: token.color,
            width: token.width,
        });
    }
    pieces
}
