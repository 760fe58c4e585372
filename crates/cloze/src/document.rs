// ABOUTME: The normalized base document (head and body kept as serialized text).
// ABOUTME: Renders complete HTML documents with a per-output title.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::markup::escape_title;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>[^<>]*?</title>").unwrap());

/// A normalized document: serialized `<head>` and `<body>` elements.
///
/// The answer key is this document rendered as-is; the quiz is rendered from
/// an independent copy of the body with placeholders spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDocument {
    head: String,
    body: String,
}

impl BaseDocument {
    pub fn new(head: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Complete HTML with the given title (a file stem, escaped here).
    pub fn render(&self, title: &str) -> String {
        render_html(&self.head, &self.body, title)
    }
}

/// Joins head and body into a document, setting its title.
pub fn render_html(head: &str, body: &str, title: &str) -> String {
    format!("<html>{}{}</html>", retitle(head, title), body)
}

/// Replaces the `<title>` of a serialized head, inserting one if absent.
pub fn retitle(head: &str, title: &str) -> String {
    let element = format!("<title>{}</title>", escape_title(title));
    if TITLE_RE.is_match(head) {
        return TITLE_RE.replace(head, NoExpand(&element)).into_owned();
    }
    match head.find('>') {
        Some(open_end) => format!("{}{}{}", &head[..=open_end], element, &head[open_end + 1..]),
        None => format!("{}{}", element, head),
    }
}
