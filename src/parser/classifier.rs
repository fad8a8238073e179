//! Line classification and inline formatting.
//!
//! [`LineClassifier`] is a single-pass, stateful scanner over the prose
//! lines of one text element. It runs in one of two states, NORMAL and
//! IN_CONCLUSION, and emits a finite, non-restartable sequence of
//! [`FormattedChunk`]s.
//!
//! Keyword-driven partial bolding is an ordered rule table evaluated in
//! sequence; the first matching rule wins and consumes the line.

use std::collections::VecDeque;
use std::ops::Range;

use regex::Regex;

use crate::model::{FormattedChunk, Inline, RunStyle, TextRun};
use crate::style::{Rgb, StyleSheet};

/// The length of both `conclusion:` and `conclution:`.
const CONCLUSION_MARKER_LEN: usize = 11;

enum RuleEffect {
    /// Re-style the entire line (bold, with a size and color override).
    StyleLine { size: f64, color: Rgb },

    /// Bold only the matched label/question substring.
    Bold,
}

struct KeywordRule {
    predicate: Regex,
    /// Separate bold pattern when the label span differs from the
    /// predicate match; `None` bolds the predicate match itself.
    bold: Option<Regex>,
    effect: RuleEffect,
}

/// Compiled patterns shared by every classifier of one build: the
/// ordered keyword catalogue plus the structural line patterns.
pub struct KeywordCatalogue {
    rules: Vec<KeywordRule>,
    inline: Regex,
    list_item_guard: Regex,
    indicator_terminator: Regex,
    code_color: Rgb,
    success: Rgb,
    failure: Rgb,
}

impl KeywordCatalogue {
    /// Compile the catalogue against a style sheet.
    pub fn new(style: &StyleSheet) -> Self {
        let bold_rule = |pattern: &str| KeywordRule {
            predicate: Regex::new(pattern).unwrap(),
            bold: None,
            effect: RuleEffect::Bold,
        };

        let rules = vec![
            // "Indicator Assessment" (and its common misspelling) becomes a header line
            KeywordRule {
                predicate: Regex::new(r"(?i)^indicator assess?ment").unwrap(),
                bold: None,
                effect: RuleEffect::StyleLine {
                    size: 14.0,
                    color: style.blue,
                },
            },
            // "iv). Conclusion:" inside relevance assessments - bold the label only
            bold_rule(r"(?i)^\s*[ivxlcdm]+\)\.?\s*(?:conclusion|conclution):"),
            // "• Conclusion:" inside consistency assessments - bold the label only
            bold_rule(r"(?i)^\s*•\s*(?:conclusion|conclution):"),
            bold_rule(r"(?i)^explanation:"),
            bold_rule(r"(?i)^indicators:"),
            // Relevance assessment questions
            bold_rule(r"(?i)the target relates directly to the indicator:"),
            bold_rule(
                r"(?i)the target expresses a specific level of performance.*?given time period[^:]*:",
            ),
            KeywordRule {
                predicate: Regex::new(
                    r"(?i)the performance indicator and targets relate logically",
                )
                .unwrap(),
                bold: Some(
                    Regex::new(
                        r"(?i)the performance indicator and targets relate logically.*?including:",
                    )
                    .unwrap(),
                ),
                effect: RuleEffect::Bold,
            },
            bold_rule(r"(?i)^\s*(?:•\s*)?-?\s*applicable legislation:?"),
            bold_rule(r"(?i)-?\s*national and provincial priorities and mtsf:?"),
            bold_rule(r"(?i)specific sector plans.*?standardi[sz]ed indicators:?"),
            // Consistency assessment questions
            bold_rule(r"(?i)^reported indicator is consistent with planned indicator:"),
            bold_rule(
                r"(?i)^reported planned annual target is consistent with planned target:",
            ),
            bold_rule(
                r"(?i)^reported achievement\(s\) is consistent with planned and reported indicators/targets:",
            ),
            bold_rule(r"(?i)^reason for variances/deviation:"),
            // Bare "Indicator:" lines render bold navy
            KeywordRule {
                predicate: Regex::new(r"(?i)^indicator:").unwrap(),
                bold: None,
                effect: RuleEffect::StyleLine {
                    size: 12.0,
                    color: style.navy,
                },
            },
        ];

        Self {
            rules,
            inline: Regex::new(r"\*\*[^*]+\*\*|\*[^*]+\*|`[^`]+`").unwrap(),
            list_item_guard: Regex::new(r"^(?:[ivxlcdm]+\)|\d+\)|[a-z]\)|•|-|\*)").unwrap(),
            indicator_terminator: Regex::new(r"(?i)^\d+\.\s*indicator:").unwrap(),
            code_color: style.grey,
            success: style.success,
            failure: style.failure,
        }
    }

    /// Apply the first matching rule to a line's spans; later rules are
    /// not consulted even when the winning rule bolds nothing.
    fn apply(&self, spans: &mut Vec<Inline>) {
        let text = line_text(spans);
        for rule in &self.rules {
            let Some(m) = rule.predicate.find(&text) else {
                continue;
            };
            match rule.effect {
                RuleEffect::StyleLine { size, color } => {
                    for inline in spans.iter_mut() {
                        if let Inline::Run(run) = inline {
                            run.style.bold = true;
                            run.style.size = Some(size);
                            run.style.color = Some(color);
                        }
                    }
                }
                RuleEffect::Bold => {
                    let range = match &rule.bold {
                        Some(pattern) => pattern.find(&text).map(|m| m.range()),
                        None => Some(m.range()),
                    };
                    if let Some(range) = range {
                        bold_range(spans, range);
                    }
                }
            }
            return;
        }
    }
}

fn line_text(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|s| match s {
            Inline::Run(run) => run.text.as_str(),
            Inline::LineBreak => "\n",
        })
        .collect()
}

/// Bold the given byte range of the line's plain text, splitting runs
/// at the range boundaries.
fn bold_range(spans: &mut Vec<Inline>, range: Range<usize>) {
    let mut result = Vec::with_capacity(spans.len() + 2);
    let mut offset = 0usize;

    for inline in spans.drain(..) {
        let run = match inline {
            Inline::Run(run) => run,
            Inline::LineBreak => {
                offset += 1;
                result.push(Inline::LineBreak);
                continue;
            }
        };

        let run_start = offset;
        let run_end = offset + run.text.len();
        offset = run_end;

        let ov_start = range.start.max(run_start);
        let ov_end = range.end.min(run_end);
        if ov_start >= ov_end {
            result.push(Inline::Run(run));
            continue;
        }

        let a = ov_start - run_start;
        let b = ov_end - run_start;
        if a > 0 {
            result.push(Inline::Run(TextRun::styled(&run.text[..a], run.style)));
        }
        let mut bold = run.style;
        bold.bold = true;
        result.push(Inline::Run(TextRun::styled(&run.text[a..b], bold)));
        if b < run.text.len() {
            result.push(Inline::Run(TextRun::styled(&run.text[b..], run.style)));
        }
    }

    *spans = result;
}

enum State {
    Normal,
    InConclusion,
}

/// Stateful scanner turning prose lines into formatted chunks.
pub struct LineClassifier<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    catalogue: &'a KeywordCatalogue,
    state: State,
    /// Processed NORMAL-state lines awaiting a paragraph flush.
    buffered: Vec<Vec<Inline>>,
    conclusion: Vec<String>,
    queue: VecDeque<FormattedChunk>,
    finished: bool,
}

impl<'a> LineClassifier<'a> {
    /// Create a classifier over one text element.
    pub fn new(text: &'a str, catalogue: &'a KeywordCatalogue) -> Self {
        Self {
            lines: text.split('\n').collect(),
            pos: 0,
            catalogue,
            state: State::Normal,
            buffered: Vec::new(),
            conclusion: Vec::new(),
            queue: VecDeque::new(),
            finished: false,
        }
    }

    fn process_line(&mut self, raw: &str) {
        let line = raw.trim();

        if line.is_empty() {
            match self.state {
                State::Normal => self.buffered.push(Vec::new()),
                State::InConclusion => self.conclusion.push(String::new()),
            }
            return;
        }

        if matches!(self.state, State::Normal) && self.is_conclusion_trigger(line) {
            self.flush_paragraph();
            self.state = State::InConclusion;
            self.conclusion.clear();
            let rest = line[CONCLUSION_MARKER_LEN..].trim();
            if !rest.is_empty() {
                self.conclusion.push(rest.to_string());
            }
            return;
        }

        if matches!(self.state, State::InConclusion) {
            if self.is_conclusion_terminator(line) {
                self.flush_conclusion();
                self.state = State::Normal;
                // The terminating line is reprocessed under NORMAL rules
            } else {
                self.conclusion.push(line.to_string());
                return;
            }
        }

        if let Some((level, text)) = heading(line) {
            self.flush_paragraph();
            self.queue.push_back(FormattedChunk::Heading { level, text });
            return;
        }

        let normalized = normalize_list_item(line);
        let mut spans = self.parse_inline(&normalized);
        self.catalogue.apply(&mut spans);
        self.buffered.push(spans);
    }

    /// A trimmed line starts a conclusion block iff it begins with the
    /// marker (accepting the `conclution` misspelling), is not a
    /// "conclusion of ..." phrase, and is not a list item.
    fn is_conclusion_trigger(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        (lower.starts_with("conclusion:") || lower.starts_with("conclution:"))
            && !lower.starts_with("conclusion of")
            && !self.catalogue.list_item_guard.is_match(line)
    }

    fn is_conclusion_terminator(&self, line: &str) -> bool {
        if line.starts_with("##") {
            return true;
        }
        if self.catalogue.indicator_terminator.is_match(line) {
            return true;
        }
        let lower = line.to_lowercase();
        lower == "indicator assessment" || lower == "indicator assesment"
    }

    /// Replace bold/italic/code markdown with styled runs and recolor
    /// check/cross glyphs.
    fn parse_inline(&self, line: &str) -> Vec<Inline> {
        let mut spans = Vec::new();
        let mut last = 0;

        for m in self.catalogue.inline.find_iter(line) {
            if m.start() > last {
                spans.push(Inline::Run(TextRun::new(&line[last..m.start()])));
            }
            let token = m.as_str();
            if let Some(inner) = token.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
                spans.push(Inline::Run(TextRun::styled(inner, RunStyle::bold())));
            } else if let Some(inner) = token.strip_prefix('`').and_then(|t| t.strip_suffix('`'))
            {
                spans.push(Inline::Run(TextRun::styled(
                    inner,
                    RunStyle {
                        code: true,
                        bold: true,
                        color: Some(self.catalogue.code_color),
                        ..Default::default()
                    },
                )));
            } else if let Some(inner) = token.strip_prefix('*').and_then(|t| t.strip_suffix('*'))
            {
                spans.push(Inline::Run(TextRun::styled(
                    inner,
                    RunStyle {
                        italic: true,
                        ..Default::default()
                    },
                )));
            }
            last = m.end();
        }
        if last < line.len() {
            spans.push(Inline::Run(TextRun::new(&line[last..])));
        }

        self.colorize_glyphs(spans)
    }

    fn colorize_glyphs(&self, spans: Vec<Inline>) -> Vec<Inline> {
        let mut out = Vec::with_capacity(spans.len());
        for inline in spans {
            let run = match inline {
                Inline::Run(run) => run,
                other => {
                    out.push(other);
                    continue;
                }
            };
            if !run.text.chars().any(|c| self.mark_color(c).is_some()) {
                out.push(Inline::Run(run));
                continue;
            }
            let mut buf = String::new();
            for c in run.text.chars() {
                match self.mark_color(c) {
                    Some(color) => {
                        if !buf.is_empty() {
                            out.push(Inline::Run(TextRun::styled(&buf, run.style)));
                            buf.clear();
                        }
                        let mut style = run.style;
                        style.color = Some(color);
                        out.push(Inline::Run(TextRun::styled(c.to_string(), style)));
                    }
                    None => buf.push(c),
                }
            }
            if !buf.is_empty() {
                out.push(Inline::Run(TextRun::styled(&buf, run.style)));
            }
        }
        out
    }

    fn mark_color(&self, c: char) -> Option<Rgb> {
        match c {
            '✔' | '✓' => Some(self.catalogue.success),
            '✖' | '✗' => Some(self.catalogue.failure),
            _ => None,
        }
    }

    fn flush_paragraph(&mut self) {
        if self.buffered.is_empty() {
            return;
        }
        let mut spans = Vec::new();
        for (i, line) in self.buffered.drain(..).enumerate() {
            if i > 0 {
                spans.push(Inline::LineBreak);
            }
            spans.extend(line);
        }
        self.queue.push_back(FormattedChunk::Paragraph(spans));
    }

    fn flush_conclusion(&mut self) {
        if self.conclusion.is_empty() {
            return;
        }
        let text = self.conclusion.join(" ");
        self.conclusion.clear();
        self.queue.push_back(FormattedChunk::Conclusion(text));
    }

    fn finish(&mut self) {
        if matches!(self.state, State::InConclusion) {
            self.flush_conclusion();
        }
        self.flush_paragraph();
        self.finished = true;
    }
}

impl Iterator for LineClassifier<'_> {
    type Item = FormattedChunk;

    fn next(&mut self) -> Option<FormattedChunk> {
        loop {
            if let Some(chunk) = self.queue.pop_front() {
                return Some(chunk);
            }
            if self.finished {
                return None;
            }
            if self.pos >= self.lines.len() {
                self.finish();
                continue;
            }
            let raw = self.lines[self.pos];
            self.pos += 1;
            self.process_line(raw);
        }
    }
}

fn heading(line: &str) -> Option<(u8, String)> {
    if let Some(rest) = line.strip_prefix("### ") {
        Some((3, rest.trim().to_string()))
    } else if let Some(rest) = line.strip_prefix("## ") {
        Some((2, rest.trim().to_string()))
    } else if let Some(rest) = line.strip_prefix("# ") {
        Some((1, rest.trim().to_string()))
    } else {
        None
    }
}

/// Normalize bullet, numbered, and roman-numeral list markers with the
/// fixed indentation scheme.
fn normalize_list_item(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return format!("  • {rest}");
    }
    if line.starts_with("• ") {
        return format!("  {line}");
    }
    // Numbered and roman markers are plain char-set checks; the
    // catalogue's guard regex only decides conclusion triggering.
    if line
        .split_once('.')
        .map(|(head, tail)| {
            !head.is_empty()
                && head.chars().all(|c| c.is_ascii_digit())
                && tail.starts_with(char::is_whitespace)
        })
        .unwrap_or(false)
    {
        return format!("  {line}");
    }
    if let Some((head, _)) = line.split_once(')') {
        if !head.is_empty()
            && head
                .chars()
                .all(|c| "ivxlcdmIVXLCDM".contains(c))
        {
            return format!("    {line}");
        }
    }
    line.to_string()
}
