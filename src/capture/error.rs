//! Error types for capture parsing.
//!
//! Only [`ParseError`] ever reaches a caller. [`LineError`] describes why a
//! single line was skipped; it is logged and the parse carries on.

use thiserror::Error;

/// Result type for capture parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Fatal parse failure. Malformed content never produces one of these.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("failed to read capture at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Reason a line was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum LineError {
    #[error("no `:` separating label from values")]
    MissingColon,

    #[error("unknown metadata label `{0}`")]
    UnknownLabel(String),

    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field {index}: expected `<number> {unit}`, found `{found}`")]
    FieldShape {
        index: usize,
        unit: &'static str,
        found: String,
    },

    #[error("field {index}: `{token}` is not a valid number")]
    FieldNumber { index: usize, token: String },

    #[error("process line has {found} fields, need at least {min}")]
    TooFewColumns { found: usize, min: usize },

    #[error("invalid {column} `{token}`")]
    Column { column: &'static str, token: String },
}
