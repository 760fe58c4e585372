// ABOUTME: Core library for toggle-cloze: turns toggle-block notes into quiz and answer-key pages.
// ABOUTME: Provides width estimation, normalization, region location, boundary finding and blank injection.

//! Cloze blanking for exported toggle-list notes.
//!
//! ```no_run
//! use toggle_cloze::{read_source, Blanker};
//!
//! let html = read_source("Geography.html".as_ref())?;
//! let out = Blanker::builder().page_width(40).build().process(
//!     &html,
//!     "Geography",
//!     "Geography_q",
//!     "Geography_a",
//! )?;
//! println!("{} blanks", out.report.spliced());
//! # Ok::<(), toggle_cloze::ClozeError>(())
//! ```

pub mod boundary;
pub mod document;
pub mod eaw;
pub mod error;
pub mod inject;
pub mod locate;
pub mod markup;
pub mod normalize;
pub mod options;
pub mod quiz;
pub mod reflow;
pub mod source;
pub mod width;

pub use document::BaseDocument;
pub use eaw::{east_asian_width, EastAsianWidth};
pub use error::{ClozeError, ErrorCode, Result};
pub use inject::{apply_edits, placeholder, Edit};
pub use locate::{locate_regions, Exclusion, Region};
pub use normalize::normalize;
pub use options::{BlankerBuilder, Options, DEFAULT_BLANK_RESERVE, PAGE_WIDTH_UNITS};
pub use quiz::{BlankReport, Blanker, RegionOutcome, RegionReport, Rendered};
pub use source::{decode_source, read_source};
pub use width::{char_width, str_width, Width};
