// ABOUTME: Page-list parsing: CSV rows of title, url and an enabled flag.
// ABOUTME: Skips blank lines and an optional header; supports quoted fields with doubled quotes.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::PageListError;
use crate::title::sanitize_title;

/// One row of the page list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub title: String,
    pub url: String,
    pub enabled: bool,
}

/// Reads and parses a page list file.
pub fn load_page_list(path: &Path) -> Result<Vec<PageEntry>, PageListError> {
    let text = fs::read_to_string(path).map_err(|source| PageListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_page_list(&text)
}

/// Parses page list text. Line numbers in errors are 1-based.
pub fn parse_page_list(text: &str) -> Result<Vec<PageEntry>, PageListError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();
    let mut seen_row = false;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(line).map_err(|reason| PageListError::malformed(line_no, reason))?;
        if fields.len() < 3 {
            return Err(PageListError::malformed(
                line_no,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }

        let first = !seen_row;
        seen_row = true;
        if first && fields[2].trim().eq_ignore_ascii_case("enabled") {
            continue;
        }

        let enabled = parse_flag(&fields[2]).ok_or_else(|| PageListError::BadFlag {
            line: line_no,
            value: fields[2].clone(),
        })?;
        entries.push(PageEntry {
            title: fields[0].clone(),
            url: fields[1].trim().to_string(),
            enabled,
        });
    }
    Ok(entries)
}

/// Sanitized titles of the enabled pages, in list order.
pub fn target_titles(entries: &[PageEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.enabled)
        .map(|e| sanitize_title(&e.title).into_owned())
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("true") || v == "1" {
        Some(true)
    } else if v.eq_ignore_ascii_case("false") || v == "0" {
        Some(false)
    } else {
        None
    }
}

fn split_row(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match (quoted, c) {
            (true, '"') => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            (true, c) => field.push(c),
            (false, '"') if field.is_empty() => quoted = true,
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (false, c) => field.push(c),
        }
    }
    if quoted {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}
