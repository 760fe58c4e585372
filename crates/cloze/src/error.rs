// ABOUTME: Error types for the cloze engine including ErrorCode enum and ClozeError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of document failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Io,
    Parse,
    Edit,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Io => "I/O error",
            ErrorCode::Parse => "malformed markup",
            ErrorCode::Edit => "invalid edit",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for document transformations.
///
/// `label` names the document being processed (a page title or a path),
/// `op` the operation that failed.
#[derive(Debug, thiserror::Error)]
pub struct ClozeError {
    pub code: ErrorCode,
    pub label: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ClozeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cloze: {} {}: {}", self.op, self.label, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ClozeError {
    /// Create an Io error.
    pub fn io(
        label: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Io,
            label: label.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Parse error.
    pub fn parse(
        label: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Parse,
            label: label.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an Edit error.
    pub fn edit(
        label: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Edit,
            label: label.into(),
            op: op.into(),
            source,
        }
    }

    /// Attach a document label to an error raised without one.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns true if this is an Io error.
    pub fn is_io(&self) -> bool {
        self.code == ErrorCode::Io
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is an Edit error.
    pub fn is_edit(&self) -> bool {
        self.code == ErrorCode::Edit
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClozeError>;
