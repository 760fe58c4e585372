// ABOUTME: Configuration options for the cloze engine including Options and BlankerBuilder.
// ABOUTME: Options deserialize from JSON with per-field defaults; BlankerBuilder is the fluent constructor.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClozeError, Result};
use crate::quiz::Blanker;

/// Full-width units available on one quiz line.
pub const PAGE_WIDTH_UNITS: u32 = 40;

/// Units of every answer assumed to be covered by the filler tabs.
pub const DEFAULT_BLANK_RESERVE: u32 = 3;

/// Configuration options for the Blanker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Width budget of one line, in full-width units.
    pub page_width: u32,
    /// Units subtracted from the answer width when sizing the blank run.
    pub blank_reserve: u32,
    /// Tab characters appended inside the placeholder highlight.
    pub filler_tabs: usize,
    /// Class of the `<mark>` element wrapping each placeholder.
    pub highlight_class: String,
    /// Stylesheet the normalized document links to.
    pub stylesheet_href: String,
    /// Leading glyphs marking a toggle as excluded by its author.
    pub skip_glyphs: Vec<char>,
    /// CSS selector of the toggle blocks collapsed by the normalizer.
    pub toggle_selector: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH_UNITS,
            blank_reserve: DEFAULT_BLANK_RESERVE,
            filler_tabs: 6,
            highlight_class: "highlight-yellow_background".to_string(),
            stylesheet_href: "css/styles.css".to_string(),
            skip_glyphs: vec!['☆', '※'],
            toggle_selector: "details".to_string(),
        }
    }
}

impl Options {
    /// Parses options from a JSON object; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ClozeError::parse("", "load options", Some(anyhow::Error::new(e))))
    }

    /// Reads options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let label = path.display().to_string();
        let text = fs::read_to_string(path)
            .map_err(|e| ClozeError::io(&label, "read options", Some(anyhow::Error::new(e))))?;
        Self::from_json_str(&text).map_err(|e| e.with_label(label))
    }
}

/// Builder for constructing Blanker instances with custom configuration.
#[derive(Debug, Clone)]
pub struct BlankerBuilder {
    opts: Options,
}

impl BlankerBuilder {
    /// Create a new BlankerBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Start from an existing set of options.
    pub fn options(mut self, opts: Options) -> Self {
        self.opts = opts;
        self
    }

    /// Set the line width budget.
    pub fn page_width(mut self, units: u32) -> Self {
        self.opts.page_width = units;
        self
    }

    /// Set the units reserved out of each blank.
    pub fn blank_reserve(mut self, units: u32) -> Self {
        self.opts.blank_reserve = units;
        self
    }

    /// Set the number of filler tabs in each placeholder.
    pub fn filler_tabs(mut self, count: usize) -> Self {
        self.opts.filler_tabs = count;
        self
    }

    /// Set the placeholder highlight class.
    pub fn highlight_class(mut self, class: impl Into<String>) -> Self {
        self.opts.highlight_class = class.into();
        self
    }

    /// Set the stylesheet link target.
    pub fn stylesheet_href(mut self, href: impl Into<String>) -> Self {
        self.opts.stylesheet_href = href.into();
        self
    }

    /// Replace the set of skip glyphs.
    pub fn skip_glyphs(mut self, glyphs: impl IntoIterator<Item = char>) -> Self {
        self.opts.skip_glyphs = glyphs.into_iter().collect();
        self
    }

    /// Set the toggle block selector.
    pub fn toggle_selector(mut self, selector: impl Into<String>) -> Self {
        self.opts.toggle_selector = selector.into();
        self
    }

    /// Build the Blanker with the configured options.
    pub fn build(self) -> Blanker {
        Blanker::new(self.opts)
    }
}

impl Default for BlankerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
