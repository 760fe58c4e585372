// ABOUTME: CLI that turns exported toggle-list pages into quiz and answer-key HTML files.
// ABOUTME: Takes source files or a page list, writes <title>_q.html and <title>_a.html (postfixes configurable), optionally prints JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};
use serde_json::json;
use toggle_cloze::{read_source, BlankReport, Blanker, Options};
use toggle_cloze_pages::{discover, load_page_list, target_titles, PageFiles, Postfixes};

/// Blank the answers of toggle-block notes and write quiz / answer-key pages.
#[derive(Parser, Debug)]
#[command(name = "toggle-cloze")]
#[command(about = "Turn toggle-list notes into cloze quizzes", long_about = None)]
struct Args {
    /// Source HTML files. Outputs are named after each file stem.
    files: Vec<PathBuf>,

    /// Page list CSV (title,url,enabled); enabled pages are read from --src-dir.
    #[arg(long)]
    pages: Option<PathBuf>,

    /// Directory holding <title>.html sources for --pages.
    #[arg(long, default_value = ".")]
    src_dir: PathBuf,

    /// Directory the quiz and answer-key files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File-stem suffix of the quiz output.
    #[arg(long, default_value = "_q", allow_hyphen_values = true)]
    quiz_postfix: String,

    /// File-stem suffix of the answer-key output.
    #[arg(long, default_value = "_a", allow_hyphen_values = true)]
    answer_postfix: String,

    /// JSON options file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Line width budget in full-width units.
    #[arg(long)]
    page_width: Option<u32>,

    /// Units of each answer left to the filler tabs.
    #[arg(long)]
    blank_reserve: Option<u32>,

    /// Print a JSON report of every page.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every page was exported.
fn run(args: Args) -> Result<bool> {
    if args.files.is_empty() && args.pages.is_none() {
        bail!("nothing to do: pass source files or --pages");
    }

    let blanker = Blanker::new(load_options(&args)?);
    let postfixes = Postfixes {
        quiz: args.quiz_postfix.clone(),
        answer: args.answer_postfix.clone(),
    };
    if postfixes.quiz == postfixes.answer {
        bail!("quiz and answer postfixes must differ");
    }

    let mut targets = Vec::new();
    if let Some(list) = &args.pages {
        let entries = load_page_list(list)?;
        targets.extend(discover(
            &target_titles(&entries),
            &args.src_dir,
            &args.out_dir,
            &postfixes,
        ));
    }
    targets.extend(
        args.files
            .iter()
            .map(|f| PageFiles::for_source(f, &args.out_dir, &postfixes)),
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut results = Vec::new();
    let mut failed = 0;
    for page in &targets {
        match export_page(&blanker, page) {
            Ok(report) => results.push(json!({
                "title": page.title,
                "ok": true,
                "quiz": page.quiz,
                "answer": page.answer,
                "spliced": report.spliced(),
                "excluded": report.excluded(),
                "invalid": report.invalid(),
                "error": null
            })),
            Err(err) => {
                error!("{}: {:#}", page.title, err);
                failed += 1;
                results.push(json!({
                    "title": page.title,
                    "ok": false,
                    "quiz": null,
                    "answer": null,
                    "error": format!("{:#}", err)
                }));
            }
        }
    }

    if args.json {
        let output = json!({
            "pages": results,
            "total_pages": targets.len(),
            "exported": targets.len() - failed,
            "failed": failed
        });
        if args.compact {
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(failed == 0)
}

fn load_options(args: &Args) -> Result<Options> {
    let mut opts = match &args.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(width) = args.page_width {
        opts.page_width = width;
    }
    if let Some(reserve) = args.blank_reserve {
        opts.blank_reserve = reserve;
    }
    Ok(opts)
}

fn export_page(blanker: &Blanker, page: &PageFiles) -> Result<BlankReport> {
    let html = read_source(&page.src)?;
    let out = blanker.process(&html, &page.title, &page.quiz_title(), &page.answer_title())?;

    write(&page.quiz, &out.quiz)?;
    info!("exported {}", page.quiz.display());
    write(&page.answer, &out.answer_key)?;
    info!("exported {}", page.answer.display());

    Ok(out.report)
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
