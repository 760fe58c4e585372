// ABOUTME: The Blanker engine that turns a normalized document into its quiz rendition.
// ABOUTME: Plans every placeholder edit from read-only scans, then applies them back to front.

use log::{debug, warn};
use serde::Serialize;

use crate::boundary::{answer_width, find_line_matches, line_end, measure_question_and_blank};
use crate::document::{render_html, BaseDocument};
use crate::error::Result;
use crate::inject::{apply_edits, placeholder, Edit};
use crate::locate::{locate_regions, Exclusion, Region};
use crate::normalize::normalize;
use crate::options::{BlankerBuilder, Options};
use crate::reflow::reflow_boundary;
use crate::width::Width;

/// Terminal state of one located region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegionOutcome {
    Excluded {
        reason: Exclusion,
    },
    /// No question/answer boundary; the region is left as is.
    Invalid {
        raw: String,
    },
    Spliced {
        lines: usize,
        question_and_blank: Width,
        answer_width: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub region: Region,
    #[serde(flatten)]
    pub outcome: RegionOutcome,
}

/// Per-document account of what happened to each region, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlankReport {
    pub regions: Vec<RegionReport>,
}

impl BlankReport {
    pub fn spliced(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Spliced { .. }))
    }

    pub fn excluded(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Excluded { .. }))
    }

    pub fn invalid(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Invalid { .. }))
    }

    fn count(&self, pred: impl Fn(&RegionOutcome) -> bool) -> usize {
        self.regions.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// A blanked body with its report.
#[derive(Debug, Clone)]
pub struct QuizBody {
    pub body: String,
    pub report: BlankReport,
}

/// Both complete documents produced for one source page.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub answer_key: String,
    pub quiz: String,
    pub report: BlankReport,
}

/// The cloze engine.
#[derive(Debug, Clone, Default)]
pub struct Blanker {
    opts: Options,
}

impl Blanker {
    pub fn new(opts: Options) -> Self {
        Self { opts }
    }

    pub fn builder() -> BlankerBuilder {
        BlankerBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Normalizes a source page into the base document.
    pub fn normalize(&self, html: &str) -> Result<BaseDocument> {
        normalize(html, &self.opts)
    }

    /// Plans the placeholder edits for `body` without touching it.
    ///
    /// Edit offsets all refer to `body`. Regions are visited back to front;
    /// the report lists them in document order.
    pub fn plan(&self, body: &str) -> (Vec<Edit>, BlankReport) {
        let mut edits = Vec::new();
        let mut regions = Vec::new();

        for located in locate_regions(body, &self.opts.skip_glyphs).into_iter().rev() {
            let outcome = match located.exclusion {
                Some(reason) => RegionOutcome::Excluded { reason },
                None => self.plan_region(body, located.region, &mut edits),
            };
            regions.push(RegionReport {
                region: located.region,
                outcome,
            });
        }
        regions.reverse();

        (edits, BlankReport { regions })
    }

    fn plan_region(&self, body: &str, region: Region, edits: &mut Vec<Edit>) -> RegionOutcome {
        let summary = region.text(body);
        let lines = find_line_matches(summary);
        let Some(first) = lines.first() else {
            return RegionOutcome::Invalid {
                raw: summary.to_string(),
            };
        };

        let target = measure_question_and_blank(summary, first);
        let aw = answer_width(self.opts.page_width, target);
        let replacement = placeholder(aw, &self.opts);

        for (i, line) in lines.iter().enumerate() {
            let start = if i == 0 {
                line.insert_at
            } else {
                reflow_boundary(summary, line, target)
            };
            let stop = line_end(summary, start);
            edits.push(Edit::new(
                region.start + start,
                region.start + stop,
                replacement.clone(),
            ));
        }

        RegionOutcome::Spliced {
            lines: lines.len(),
            question_and_blank: target,
            answer_width: aw,
        }
    }

    /// Produces the quiz body for `base`. The base document is not modified.
    ///
    /// Diagnostics for excluded and invalid regions are logged once the whole
    /// document has been planned.
    pub fn blank(&self, base: &BaseDocument, label: &str) -> Result<QuizBody> {
        let (edits, report) = self.plan(base.body());

        for r in &report.regions {
            match &r.outcome {
                RegionOutcome::Invalid { raw } => {
                    warn!("{}: no question/answer boundary at {}: {}", label, r.region.start, raw);
                }
                RegionOutcome::Excluded { reason } => {
                    debug!("{}: region at {} excluded ({})", label, r.region.start, reason);
                }
                RegionOutcome::Spliced { .. } => {}
            }
        }

        let body = apply_edits(base.body(), edits).map_err(|e| e.with_label(label))?;
        Ok(QuizBody { body, report })
    }

    /// Runs the whole transformation for one page: normalize, blank, render.
    pub fn process(
        &self,
        html: &str,
        label: &str,
        quiz_title: &str,
        answer_title: &str,
    ) -> Result<Rendered> {
        let base = self.normalize(html).map_err(|e| e.with_label(label))?;
        let quiz = self.blank(&base, label)?;
        Ok(Rendered {
            answer_key: base.render(answer_title),
            quiz: render_html(base.head(), &quiz.body, quiz_title),
            report: quiz.report,
        })
    }
}
