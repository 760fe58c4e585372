// ABOUTME: End-to-end scenarios for the cloze engine over small pages and the geography fixture.
// ABOUTME: Covers blank sizing, exclusions, the width budget, reflow correction and output titles.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use toggle_cloze::boundary::{find_line_matches, measure_question_and_blank};
use toggle_cloze::markup::strip_tags;
use toggle_cloze::reflow::{reflow_boundary, sweep_root};
use toggle_cloze::{
    read_source, str_width, BaseDocument, Blanker, Exclusion, RegionOutcome, Width,
    PAGE_WIDTH_UNITS,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    read_source(&path).unwrap()
}

fn page(summary: &str) -> String {
    format!(
        "<html><head><title>x</title></head><body><ul class=\"toggle\"><li><details open=\"\">{}<p>detail</p></details></li></ul></body></html>",
        summary
    )
}

fn base_and_quiz(html: &str) -> (BaseDocument, toggle_cloze::quiz::QuizBody) {
    let blanker = Blanker::default();
    let base = blanker.normalize(html).unwrap();
    let quiz = blanker.blank(&base, "test").unwrap();
    (base, quiz)
}

#[test]
fn capital_of_japan_single_line() {
    let html = page("<summary>Capital of Japan\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}Tokyo</summary>");
    let out = Blanker::default()
        .process(&html, "Capitals", "Capitals_q", "Capitals_a")
        .unwrap();

    let qab = str_width("Capital of Japan\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}");
    let expected_blanks = PAGE_WIDTH_UNITS as usize - qab.floor() as usize - 3;
    assert_eq!(expected_blanks, 26);

    let placeholder = format!(
        "<summary>Capital of Japan\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}<mark class=\"highlight-yellow_background\">{}{}</mark></summary>",
        "\u{3000}".repeat(expected_blanks),
        "\t".repeat(6)
    );
    assert!(out.quiz.contains(&placeholder), "quiz was {}", out.quiz);
    assert!(!out.quiz.contains("Tokyo"));
    assert!(out.answer_key.contains("Tokyo"));
}

#[test]
fn skip_glyph_region_is_unchanged() {
    let summary = "<summary>☆Capital of Atlantis\u{3000}\u{3000}Unknown</summary>";
    let (base, quiz) = base_and_quiz(&page(summary));
    assert_eq!(quiz.body, base.body());
    assert!(quiz.body.contains(summary));
    assert_eq!(
        quiz.report.regions[0].outcome,
        RegionOutcome::Excluded {
            reason: Exclusion::SkipGlyph('☆')
        }
    );
}

#[test]
fn struck_through_region_is_unchanged() {
    let summary = "<summary><del>Capital of Australia\u{3000}\u{3000}Sydney</del></summary>";
    let (base, quiz) = base_and_quiz(&page(summary));
    assert_eq!(quiz.body, base.body());
    assert_eq!(quiz.report.excluded(), 1);
}

#[test]
fn struck_question_and_answer_region_is_unchanged() {
    let summary = "<summary><del>Capital of Australia</del>\u{3000}\u{3000}<del>Sydney</del></summary>";
    let (base, quiz) = base_and_quiz(&page(summary));
    assert_eq!(quiz.body, base.body());
    assert!(quiz.body.contains("<del>Sydney</del>"));
    assert_eq!(quiz.report.excluded(), 1);
    assert_eq!(quiz.report.spliced(), 0);
}

#[test]
fn fixture_report_counts() {
    let out = Blanker::default()
        .process(&fixture("geography.html"), "Geography", "Geography_q", "Geography_a")
        .unwrap();
    assert_eq!(out.report.spliced(), 3);
    assert_eq!(out.report.excluded(), 2);
    assert_eq!(out.report.invalid(), 1);
}

#[test]
fn fixture_excluded_regions_survive_verbatim() {
    let (base, quiz) = base_and_quiz(&fixture("geography.html"));
    for r in &quiz.report.regions {
        if let RegionOutcome::Excluded { .. } = r.outcome {
            assert!(quiz.body.contains(r.region.text(base.body())));
        }
    }
    assert!(quiz.body.contains("Unknown"));
    assert!(quiz.body.contains("Sydney"));
}

#[test]
fn fixture_invalid_region_is_left_alone() {
    let (_, quiz) = base_and_quiz(&fixture("geography.html"));
    assert!(quiz
        .body
        .contains("<summary>Longest river in Africa, no blank here</summary>"));
}

#[test]
fn answer_width_stays_within_page() {
    let (_, quiz) = base_and_quiz(&fixture("geography.html"));
    let limit = f64::from(PAGE_WIDTH_UNITS + 1);
    for r in &quiz.report.regions {
        if let RegionOutcome::Spliced {
            question_and_blank,
            answer_width,
            ..
        } = &r.outcome
        {
            assert!(*answer_width as f64 + question_and_blank.to_f64() <= limit);
        }
    }
}

#[test]
fn two_line_region_is_reflow_corrected() {
    let blanker = Blanker::default();
    let base = blanker.normalize(&fixture("geography.html")).unwrap();
    let body = base.body();

    let start = body.find("<summary>Capital of Japan\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}Tokyo\n").unwrap();
    let end = start + body[start..].find("</summary>").unwrap() + "</summary>".len();
    let summary = &body[start..end];

    let lines = find_line_matches(summary);
    assert_eq!(lines.len(), 2);
    let target = measure_question_and_blank(summary, &lines[0]);

    let second = &lines[1];
    let at = reflow_boundary(summary, second, target);
    let swept = str_width(&strip_tags(&summary[sweep_root(summary, second)..at]));

    // Naive offset would sit at the second line's own whitespace run.
    assert!(at < second.insert_at);
    assert!(swept <= target);
    assert!(target.to_f64() - swept.to_f64() < 1.0);

    let quiz = blanker.blank(&base, "Geography").unwrap();
    assert!(quiz
        .body
        .contains("\n-<strong>Largest</strong> <em>city</em> of the Kanto"));
    assert!(!quiz.body.contains("capital region"));
}

#[test]
fn fixture_documents_are_normalized_and_titled() {
    let out = Blanker::default()
        .process(&fixture("geography.html"), "Geography", "Geography_q", "Geography_a")
        .unwrap();
    for doc in [&out.quiz, &out.answer_key] {
        assert!(doc.contains("<link rel=\"stylesheet\" href=\"css/styles.css\" />"));
        assert!(!doc.contains("<style>"));
        assert!(!doc.contains("<a "));
        assert!(doc.contains("the atlas"));
        assert!(!doc.contains("open=\"\""));
        assert!(!doc.contains("Population about 14 million"));
        assert!(doc.contains("<code>Everest8848</code>"));
    }
    assert!(out.quiz.contains("<title>Geography_q</title>"));
    assert!(out.answer_key.contains("<title>Geography_a</title>"));
    assert!(out.answer_key.contains("\u{3000}Tokyo</summary>"));
}

#[test]
fn width_is_additive_over_fixture_text() {
    let text = strip_tags(&fixture("geography.html")).into_owned();
    let summed: Width = text.chars().map(toggle_cloze::char_width).sum();
    assert_eq!(str_width(&text), summed);
}
