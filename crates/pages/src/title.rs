// ABOUTME: Page title sanitization for use as export file stems.
// ABOUTME: Replaces path-hostile characters and collapses runs of ASCII spaces.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static PATH_HOSTILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]"#).unwrap());
static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"  +").unwrap());

/// Turns a page title into a file stem.
///
/// HTML collapses runs of spaces, so a title with one would no longer match
/// its rendered `<title>`; runs are collapsed here up front.
pub fn sanitize_title(title: &str) -> Cow<'_, str> {
    match PATH_HOSTILE_RE.replace_all(title, "_") {
        Cow::Borrowed(t) => SPACE_RUN_RE.replace_all(t, " "),
        Cow::Owned(t) => Cow::Owned(SPACE_RUN_RE.replace_all(&t, " ").into_owned()),
    }
}
