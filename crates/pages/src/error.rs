// ABOUTME: Error types for page-list loading.
// ABOUTME: Provides PageListError with Io, MalformedRow and BadFlag variants.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the page list.
#[derive(Debug, Error)]
pub enum PageListError {
    /// The page list file could not be read.
    #[error("failed to read page list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row does not have the `title,url,enabled` shape.
    #[error("malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// The enabled column is neither a boolean nor 0/1.
    #[error("row {line}: enabled flag {value:?} is not True/False/1/0")]
    BadFlag { line: usize, value: String },
}

impl PageListError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        PageListError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}
