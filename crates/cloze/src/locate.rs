// ABOUTME: Blank-region locator scanning a normalized body for toggle summaries.
// ABOUTME: Applies the author exclusion rules (leading skip glyph, fully struck-through summary).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::markup::skip_leading_tags;

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<summary>.*?</summary>").unwrap());

const STRUCK_OPEN: &str = "<summary><del>";
const STRUCK_CLOSE: &str = "</del></summary>";

/// A half-open byte range `[start, end)` covering one `<summary>...</summary>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn text<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }
}

/// Why a region is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    /// Summary text starts with a reserved skip glyph.
    SkipGlyph(char),
    /// The summary opens and closes inside `<del>`.
    StruckThrough,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::SkipGlyph(c) => write!(f, "skip glyph {}", c),
            Exclusion::StruckThrough => write!(f, "struck through"),
        }
    }
}

/// A region found by the scan, with its exclusion verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedRegion {
    pub region: Region,
    pub exclusion: Option<Exclusion>,
}

impl LocatedRegion {
    pub fn is_included(&self) -> bool {
        self.exclusion.is_none()
    }
}

/// Scans `body` for summary elements, in document order.
pub fn locate_regions(body: &str, skip_glyphs: &[char]) -> Vec<LocatedRegion> {
    SUMMARY_RE
        .find_iter(body)
        .map(|m| {
            let region = Region {
                start: m.start(),
                end: m.end(),
            };
            LocatedRegion {
                region,
                exclusion: exclusion(m.as_str(), skip_glyphs),
            }
        })
        .collect()
}

/// Applies the exclusion rules to one summary element's markup.
pub fn exclusion(summary: &str, skip_glyphs: &[char]) -> Option<Exclusion> {
    if let Some(first) = skip_leading_tags(summary).chars().next() {
        if skip_glyphs.contains(&first) {
            return Some(Exclusion::SkipGlyph(first));
        }
    }
    if is_struck_through(summary) {
        return Some(Exclusion::StruckThrough);
    }
    None
}

// Opening and closing the summary inside `<del>` marks the whole entry void,
// even when several struck spans sit in between.
fn is_struck_through(summary: &str) -> bool {
    summary.len() >= STRUCK_OPEN.len() + STRUCK_CLOSE.len()
        && summary.starts_with(STRUCK_OPEN)
        && summary.ends_with(STRUCK_CLOSE)
}
