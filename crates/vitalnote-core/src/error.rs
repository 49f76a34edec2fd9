//! Error types for the vitalnote-core library.

use thiserror::Error;

use crate::metrics::rules::format_number;
use crate::models::metric::Dimension;

/// Main error type for the vitalnote library.
#[derive(Error, Debug)]
pub enum VitalNoteError {
    /// Health metric extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// The clinical note failed its precondition checks.
    #[error("invalid note: {0}")]
    Note(#[from] NoteError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while extracting a metric from note text.
///
/// Either variant aborts the whole extraction call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Captured numeric text did not parse as a float.
    #[error("unable to parse given {dimension} of {value}")]
    Parse { dimension: Dimension, value: String },

    /// Converted value fell outside the plausible range for its dimension.
    ///
    /// `value` is already rounded to two decimal places.
    #[error("invalid {dimension} of {} {unit}", display_value(.value))]
    Range {
        dimension: Dimension,
        value: f64,
        unit: &'static str,
    },
}

impl ExtractionError {
    /// Dimension whose extraction failed.
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Parse { dimension, .. } | Self::Range { dimension, .. } => *dimension,
        }
    }
}

fn display_value(value: &f64) -> String {
    format_number(*value)
}

/// Precondition failures for a clinical note.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// Note text is empty.
    #[error("note text is required")]
    Empty,

    /// Note text is longer than allowed.
    #[error("note text is {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },
}

/// Result type for the vitalnote library.
pub type Result<T> = std::result::Result<T, VitalNoteError>;
