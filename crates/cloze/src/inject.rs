// ABOUTME: Placeholder construction and edit-list application for the quiz body.
// ABOUTME: Edits are planned against the original buffer and applied back to front.

use crate::error::{ClozeError, Result};
use crate::options::Options;

const BLANK: char = '\u{3000}';

/// Replace `buffer[start..end]` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Number of full-width spaces in a placeholder for `answer_width` units.
pub fn blank_run_len(answer_width: i64, reserve: u32) -> usize {
    usize::try_from(answer_width - i64::from(reserve)).unwrap_or(0)
}

/// Highlighted placeholder: full-width spaces for the answer width minus the
/// reserve, then the filler tabs that stretch the highlight.
pub fn placeholder(answer_width: i64, opts: &Options) -> String {
    let blanks = blank_run_len(answer_width, opts.blank_reserve);
    let mut out = format!("<mark class=\"{}\">", opts.highlight_class);
    out.extend(std::iter::repeat(BLANK).take(blanks));
    out.extend(std::iter::repeat('\t').take(opts.filler_tabs));
    out.push_str("</mark>");
    out
}

/// Applies one edit, producing a new buffer.
pub fn splice(buffer: &str, edit: &Edit) -> String {
    let mut out =
        String::with_capacity(buffer.len() - (edit.end - edit.start) + edit.replacement.len());
    out.push_str(&buffer[..edit.start]);
    out.push_str(&edit.replacement);
    out.push_str(&buffer[edit.end..]);
    out
}

/// Applies edits whose offsets all refer to `buffer` as given.
///
/// Edits are sorted by descending start and spliced one at a time, so no
/// splice moves an offset still to be used. Overlapping or out-of-range
/// edits are rejected.
pub fn apply_edits(buffer: &str, mut edits: Vec<Edit>) -> Result<String> {
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut floor_of_next = buffer.len();
    for edit in &edits {
        if edit.start > edit.end
            || edit.end > floor_of_next
            || !buffer.is_char_boundary(edit.start)
            || !buffer.is_char_boundary(edit.end)
        {
            return Err(ClozeError::edit(
                "",
                "apply_edits",
                Some(anyhow::anyhow!(
                    "edit {}..{} overlaps a later edit or leaves the buffer ({} bytes)",
                    edit.start,
                    edit.end,
                    buffer.len()
                )),
            ));
        }
        floor_of_next = edit.start;
    }

    Ok(edits
        .iter()
        .fold(buffer.to_string(), |acc, edit| splice(&acc, edit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fifty() -> String {
        "0123456789".repeat(5)
    }

    #[test]
    fn test_placeholder_shape() {
        let opts = Options::default();
        let p = placeholder(29, &opts);
        assert_eq!(
            p,
            format!(
                "<mark class=\"highlight-yellow_background\">{}{}</mark>",
                "\u{3000}".repeat(26),
                "\t".repeat(6)
            )
        );
    }

    #[test]
    fn test_placeholder_never_negative() {
        let opts = Options::default();
        assert_eq!(blank_run_len(2, 3), 0);
        assert_eq!(blank_run_len(-7, 3), 0);
        assert_eq!(
            placeholder(-7, &opts),
            "<mark class=\"highlight-yellow_background\">\t\t\t\t\t\t</mark>"
        );
    }

    #[test]
    fn test_descending_matches_independent_computation() {
        let buf = fifty();
        let edits = vec![Edit::new(10, 20, "X"), Edit::new(30, 45, "YY")];

        let expected = format!("{}X{}YY{}", &buf[..10], &buf[20..30], &buf[45..]);
        assert_eq!(apply_edits(&buf, edits.clone()).unwrap(), expected);

        // Input order does not matter.
        let reversed: Vec<Edit> = edits.into_iter().rev().collect();
        assert_eq!(apply_edits(&buf, reversed).unwrap(), expected);
    }

    #[test]
    fn test_ascending_splicing_corrupts_later_offsets() {
        let buf = fifty();
        let edits = [Edit::new(10, 20, "X"), Edit::new(30, 45, "YY")];

        let ascending = edits.iter().fold(buf.clone(), |acc, e| splice(&acc, e));
        let expected = format!("{}X{}YY{}", &buf[..10], &buf[20..30], &buf[45..]);
        assert_ne!(ascending, expected);
    }

    #[test]
    fn test_overlapping_edits_are_rejected() {
        let buf = fifty();
        let err = apply_edits(&buf, vec![Edit::new(10, 32, "X"), Edit::new(30, 45, "Y")])
            .unwrap_err();
        assert!(err.is_edit());
    }

    #[test]
    fn test_out_of_range_edit_is_rejected() {
        let err = apply_edits("short", vec![Edit::new(2, 9, "X")]).unwrap_err();
        assert!(err.is_edit());
    }

    #[test]
    fn test_adjacent_edits_are_allowed() {
        let out = apply_edits("abcdef", vec![Edit::new(0, 3, "X"), Edit::new(3, 6, "Y")]).unwrap();
        assert_eq!(out, "XY");
    }
}
