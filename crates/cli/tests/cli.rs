// ABOUTME: Integration tests for the toggle-cloze CLI binary.
// ABOUTME: Tests file and page-list inputs, option overrides, JSON output and per-page failures.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const TOKYO_PAGE: &str = "<html><head><title>Export</title><style>p{}</style></head><body><ul class=\"toggle\"><li><details open=\"\"><summary>Capital of Japan\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}Tokyo</summary><p>detail</p></details></li></ul></body></html>";

fn cloze_cmd() -> Command {
    Command::cargo_bin("toggle-cloze").unwrap()
}

fn blank_run(quiz: &str) -> usize {
    let start = quiz.find("<mark").unwrap();
    let open_end = start + quiz[start..].find('>').unwrap() + 1;
    quiz[open_end..].chars().take_while(|&c| c == '\u{3000}').count()
}

fn write_page(dir: &Path, name: &str, html: &str) {
    fs::write(dir.join(name), html).unwrap();
}

#[test]
fn blanks_a_source_file() {
    let temp_dir = TempDir::new().unwrap();
    write_page(temp_dir.path(), "Capitals.html", TOKYO_PAGE);
    let out_dir = temp_dir.path().join("out");

    cloze_cmd()
        .arg(temp_dir.path().join("Capitals.html"))
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let quiz = fs::read_to_string(out_dir.join("Capitals_q.html")).unwrap();
    let answer = fs::read_to_string(out_dir.join("Capitals_a.html")).unwrap();
    assert!(!quiz.contains("Tokyo"));
    assert!(quiz.contains("<title>Capitals_q</title>"));
    assert_eq!(blank_run(&quiz), 26);
    assert!(answer.contains("Tokyo"));
    assert!(answer.contains("<title>Capitals_a</title>"));
    assert!(answer.contains("href=\"css/styles.css\""));
}

#[test]
fn json_report_counts_regions() {
    let temp_dir = TempDir::new().unwrap();
    write_page(temp_dir.path(), "Capitals.html", TOKYO_PAGE);

    cloze_cmd()
        .arg(temp_dir.path().join("Capitals.html"))
        .arg("--out-dir")
        .arg(temp_dir.path())
        .arg("--json")
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"spliced\":1"))
        .stdout(predicate::str::contains("\"failed\":0"));
}

#[test]
fn flags_override_config_file() {
    let temp_dir = TempDir::new().unwrap();
    write_page(temp_dir.path(), "Capitals.html", TOKYO_PAGE);
    let config = temp_dir.path().join("cloze.json");
    fs::write(&config, r#"{"page_width": 50, "blank_reserve": 0}"#).unwrap();

    cloze_cmd()
        .arg(temp_dir.path().join("Capitals.html"))
        .arg("--out-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--page-width")
        .arg("30")
        .assert()
        .success();

    let quiz = fs::read_to_string(temp_dir.path().join("Capitals_q.html")).unwrap();
    assert_eq!(blank_run(&quiz), 30 - 11);
}

#[test]
fn page_list_skips_disabled_and_missing_pages() {
    let temp_dir = TempDir::new().unwrap();
    let src_dir = temp_dir.path().join("html");
    fs::create_dir(&src_dir).unwrap();
    write_page(&src_dir, "Capitals.html", TOKYO_PAGE);
    write_page(&src_dir, "Rivers.html", TOKYO_PAGE);
    let list = temp_dir.path().join("pages.csv");
    fs::write(
        &list,
        "title,url,enabled\nCapitals,https://example.com/c,True\nRivers,https://example.com/r,False\nMountains,https://example.com/m,True\n",
    )
    .unwrap();
    let out_dir = temp_dir.path().join("out");

    cloze_cmd()
        .arg("--pages")
        .arg(&list)
        .arg("--src-dir")
        .arg(&src_dir)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Mountains.html"));

    assert!(out_dir.join("Capitals_q.html").exists());
    assert!(!out_dir.join("Rivers_q.html").exists());
    assert!(!out_dir.join("Mountains_q.html").exists());
}

#[test]
fn broken_page_fails_without_stopping_others() {
    let temp_dir = TempDir::new().unwrap();
    write_page(temp_dir.path(), "Good.html", TOKYO_PAGE);
    write_page(
        temp_dir.path(),
        "Broken.html",
        "<html><body><details><summary>never closed</details></body></html>",
    );

    cloze_cmd()
        .arg(temp_dir.path().join("Broken.html"))
        .arg(temp_dir.path().join("Good.html"))
        .arg("--out-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unbalanced <summary>"));

    assert!(temp_dir.path().join("Good_q.html").exists());
    assert!(!temp_dir.path().join("Broken_q.html").exists());
}

#[test]
fn no_inputs_is_an_error() {
    cloze_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to do"));
}

#[test]
fn custom_postfixes_name_outputs_and_titles() {
    let temp_dir = TempDir::new().unwrap();
    write_page(temp_dir.path(), "Capitals.html", TOKYO_PAGE);

    cloze_cmd()
        .arg(temp_dir.path().join("Capitals.html"))
        .arg("--out-dir")
        .arg(temp_dir.path())
        .arg("--quiz-postfix")
        .arg("-quiz")
        .arg("--answer-postfix")
        .arg("-key")
        .assert()
        .success();

    let quiz = fs::read_to_string(temp_dir.path().join("Capitals-quiz.html")).unwrap();
    let answer = fs::read_to_string(temp_dir.path().join("Capitals-key.html")).unwrap();
    assert!(quiz.contains("<title>Capitals-quiz</title>"));
    assert!(answer.contains("<title>Capitals-key</title>"));
    assert!(!temp_dir.path().join("Capitals_q.html").exists());
}

#[test]
fn identical_postfixes_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_page(temp_dir.path(), "Capitals.html", TOKYO_PAGE);

    cloze_cmd()
        .arg(temp_dir.path().join("Capitals.html"))
        .arg("--out-dir")
        .arg(temp_dir.path())
        .arg("--quiz-postfix")
        .arg("_x")
        .arg("--answer-postfix")
        .arg("_x")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("postfixes must differ"));
}

#[test]
fn region_without_boundary_is_warned_with_its_markup() {
    let temp_dir = TempDir::new().unwrap();
    write_page(
        temp_dir.path(),
        "Rivers.html",
        "<html><head><title>x</title></head><body><details><summary>Longest river in Africa, no blank here</summary><p>Nile</p></details></body></html>",
    );

    cloze_cmd()
        .env("RUST_LOG", "warn")
        .arg(temp_dir.path().join("Rivers.html"))
        .arg("--out-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains(
            "<summary>Longest river in Africa, no blank here</summary>",
        ));

    let quiz = fs::read_to_string(temp_dir.path().join("Rivers_q.html")).unwrap();
    assert!(quiz.contains("<summary>Longest river in Africa, no blank here</summary>"));
}
