// ABOUTME: Question/answer boundary finder for one toggle summary.
// ABOUTME: Locates per-line whitespace-run boundaries and derives the answer width budget.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::strip_tags;
use crate::width::{str_width, Width};

// Line start token, question text, a run of 2+ full/half-width spaces, then
// the first answer character.
static LINE_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<summary>|\n)([^\n]*?[\x{3000} ]{2,})[^\x{3000} \n]").unwrap()
});

/// One line of a summary whose question is followed by a blank run.
///
/// Offsets are relative to the summary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch {
    /// Offset of the `<summary>` or `\n` token opening the line.
    pub line_start: usize,
    /// Offset just past that token.
    pub lead_end: usize,
    /// Offset of the first answer character.
    pub insert_at: usize,
}

/// Every line of `summary` with a question/answer boundary, in order.
pub fn find_line_matches(summary: &str) -> Vec<LineMatch> {
    LINE_BOUNDARY_RE
        .captures_iter(summary)
        .filter_map(|caps| {
            let token = caps.get(1)?;
            let body = caps.get(2)?;
            Some(LineMatch {
                line_start: token.start(),
                lead_end: token.end(),
                insert_at: body.end(),
            })
        })
        .collect()
}

/// Raw question-plus-blank markup of a line.
pub fn question_and_blank<'a>(summary: &'a str, line: &LineMatch) -> &'a str {
    &summary[line.lead_end..line.insert_at]
}

/// Width of a line's question-plus-blank text with tags removed.
pub fn measure_question_and_blank(summary: &str, line: &LineMatch) -> Width {
    str_width(&strip_tags(question_and_blank(summary, line)))
}

/// Units left for the answer: `page_width - floor(question_and_blank)`.
///
/// Negative when the question alone overflows the line.
pub fn answer_width(page_width: u32, question_and_blank: Width) -> i64 {
    i64::from(page_width) - question_and_blank.floor() as i64
}

/// Offset of the next `</summary>` or newline at or after `from`.
pub fn line_end(summary: &str, from: usize) -> usize {
    let rest = &summary[from..];
    let offset = match (rest.find("</summary>"), rest.find('\n')) {
        (Some(close), Some(newline)) => close.min(newline),
        (close, newline) => close.or(newline).unwrap_or(rest.len()),
    };
    from + offset
}
