// ABOUTME: Small string-level markup helpers shared by the blanking pass.
// ABOUTME: Tag stripping, leading-tag skipping, and minimal entity escaping for text and titles.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());

/// Removes complete `<...>` tags, leaving text (and any unterminated `<`) intact.
///
/// Entities are not decoded; widths are measured on the serialized text.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(s, "")
}

/// Returns the text after any run of leading complete tags.
pub fn skip_leading_tags(s: &str) -> &str {
    let mut rest = s;
    while rest.starts_with('<') {
        match rest.find('>') {
            Some(end) if !rest[1..end].contains('<') => rest = &rest[end + 1..],
            _ => break,
        }
    }
    rest
}

/// Escapes `&` only. Page titles come from file names and must stay
/// byte-identical to the names used elsewhere, so no other entity is produced.
pub fn escape_title(title: &str) -> String {
    title.replace('&', "&amp;")
}

/// Escapes text-node content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape attribute value
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_basic() {
        assert_eq!(strip_tags("<summary>Q<strong>x</strong></summary>"), "Qx");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn test_strip_tags_keeps_partial_tag() {
        assert_eq!(strip_tags("abc<stro"), "abc<stro");
        assert_eq!(strip_tags("<em>a</em>b<"), "ab<");
    }

    #[test]
    fn test_skip_leading_tags() {
        assert_eq!(skip_leading_tags("<summary><mark>☆ Q"), "☆ Q");
        assert_eq!(skip_leading_tags("plain"), "plain");
        assert_eq!(skip_leading_tags("<<b>x"), "<<b>x");
        assert_eq!(skip_leading_tags("<unterminated"), "<unterminated");
    }

    #[test]
    fn test_escape_title_only_ampersand() {
        assert_eq!(escape_title("Q&A <draft>"), "Q&amp;A <draft>");
        assert_eq!(escape_title("a\u{00A0}b"), "a\u{00A0}b");
    }

    #[test]
    fn test_escape_text_and_attr() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
    }
}
