use thiserror::Error;

use crate::models::DocumentFormat;

/// Failures the parsing pipeline can surface. Most of these never reach a
/// caller of the lenient entry points: the manager absorbs them by moving on
/// to the next candidate or fallback strategy, and only a total miss comes
/// back, as an absent result. The strict chip-validation path returns them
/// directly so callers can tell which field went wrong.
#[derive(Debug, Error, PartialEq)]
pub enum MrzError {
    #[error("{format:?} needs {expected} line(s), found {found}")]
    InsufficientLines {
        format: DocumentFormat,
        expected: usize,
        found: usize,
    },

    #[error("line {index} is {length} characters, {required} required")]
    LineTooShort {
        index: usize,
        length: usize,
        required: usize,
    },

    #[error("check digit mismatch for {field}")]
    CheckDigitMismatch { field: &'static str },

    #[error("invalid {field} date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("no machine readable zone found")]
    NoMrzFound,
}
