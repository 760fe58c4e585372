// ABOUTME: Reflow corrector for continuation lines of multi-line summaries.
// ABOUTME: Sweeps a line's markup to find where its stripped width reaches the first line's target.

//! Reflow correction.
//!
//! The blank on every line of a summary must start at the same visual column
//! as the first line's blank. Per-line markup differs (a bold term on one
//! line, plain text on the next), so the same column sits at different raw
//! offsets. The corrector sweeps the raw line one character at a time,
//! strips tags from the swept window and re-measures it, stopping before the
//! character that either pushes the width past the target or completes a
//! whitespace-run boundary.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::boundary::{line_end, LineMatch};
use crate::markup::strip_tags;
use crate::width::{str_width, Width};

// Swept text ending in a whitespace run followed by one answer character.
static SWEPT_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\n]*[\x{3000} ]{2,}[^\x{3000} \n]$").unwrap());

// Text nodes are serialized with `<` escaped, so a bare `<` opens a tag.
static TRAILING_PARTIAL_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*$").unwrap());

/// Offset where the sweep of a continuation line begins: past the newline
/// and the line's leading marker character.
pub fn sweep_root(summary: &str, line: &LineMatch) -> usize {
    let after_token = line.lead_end;
    summary[after_token..]
        .chars()
        .next()
        .filter(|&c| c != '\n')
        .map_or(after_token, |c| after_token + c.len_utf8())
}

/// Window text with complete tags and a tag still being swept removed, so
/// the sweep never stops inside a tag.
fn strip_swept(window: &str) -> String {
    let stripped = strip_tags(window);
    TRAILING_PARTIAL_TAG_RE.replace(&stripped, "").into_owned()
}

/// Reflow-corrected insertion offset for a continuation line.
///
/// `target` is the first line's question-plus-blank width. The result never
/// passes the end of the line.
pub fn reflow_boundary(summary: &str, line: &LineMatch, target: Width) -> usize {
    let root = sweep_root(summary, line);
    let end = line_end(summary, root);

    for (offset, c) in summary[root..end].char_indices() {
        let cursor = root + offset + c.len_utf8();
        let swept = strip_swept(&summary[root..cursor]);
        if str_width(&swept) > target || SWEPT_BOUNDARY_RE.is_match(&swept) {
            return root + offset;
        }
    }
    end
}
