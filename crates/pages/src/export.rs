// ABOUTME: Export registry mapping each page title to its source and output files.
// ABOUTME: Discovers which target pages have a source export on disk.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

/// File-stem suffixes of the two outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Postfixes {
    pub quiz: String,
    pub answer: String,
}

impl Default for Postfixes {
    fn default() -> Self {
        Self {
            quiz: "_q".to_string(),
            answer: "_a".to_string(),
        }
    }
}

/// Files belonging to one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFiles {
    pub title: String,
    pub src: PathBuf,
    pub quiz: PathBuf,
    pub answer: PathBuf,
}

impl PageFiles {
    pub fn new(title: &str, src_dir: &Path, out_dir: &Path, postfixes: &Postfixes) -> Self {
        Self {
            title: title.to_string(),
            src: src_dir.join(format!("{}.html", title)),
            quiz: out_dir.join(format!("{}{}.html", title, postfixes.quiz)),
            answer: out_dir.join(format!("{}{}.html", title, postfixes.answer)),
        }
    }

    /// For a source path given directly: outputs land in `out_dir` next to
    /// each other, named after the source stem.
    pub fn for_source(src: &Path, out_dir: &Path, postfixes: &Postfixes) -> Self {
        let title = src
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            src: src.to_path_buf(),
            ..Self::new(&title, Path::new(""), out_dir, postfixes)
        }
    }

    /// `<title>` of the quiz document.
    pub fn quiz_title(&self) -> String {
        stem(&self.quiz)
    }

    /// `<title>` of the answer-key document.
    pub fn answer_title(&self) -> String {
        stem(&self.answer)
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pages whose source export exists. Missing sources are logged and skipped.
pub fn discover(
    titles: &[String],
    src_dir: &Path,
    out_dir: &Path,
    postfixes: &Postfixes,
) -> Vec<PageFiles> {
    titles
        .iter()
        .map(|t| PageFiles::new(t, src_dir, out_dir, postfixes))
        .filter(|files| {
            let exists = files.src.is_file();
            if !exists {
                info!("missed the source file {}", files.src.display());
            }
            exists
        })
        .collect()
}
