//! Health metric data models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// Default upper bound on note length, in characters.
pub const MAX_NOTE_CHARS: usize = 500;

/// An independent axis of extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Weight,
    Height,
}

impl Dimension {
    /// Unit every reported value of this dimension is expressed in.
    pub fn canonical_unit(self) -> Unit {
        match self {
            Self::Weight => Unit::Kilogram,
            Self::Height => Unit::Centimetre,
        }
    }

    /// Number of decimal places kept in the formatted result.
    pub fn precision(self) -> i32 {
        match self {
            Self::Weight => 2,
            Self::Height => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical short form of a recognized unit token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Kilogram,
    Pound,
    Centimetre,
    Millimetre,
    Metre,
    Foot,
    Inch,
}

impl Unit {
    /// Short symbol used in rendered output and error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Pound => "lb",
            Self::Centimetre => "cm",
            Self::Millimetre => "mm",
            Self::Metre => "m",
            Self::Foot => "ft",
            Self::Inch => "in",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Self::Kilogram | Self::Pound => Dimension::Weight,
            _ => Dimension::Height,
        }
    }

    pub fn is_canonical(self) -> bool {
        self == self.dimension().canonical_unit()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single measurement read from a note, before range validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }
}

/// Structured output of one extraction call.
///
/// Each field is either empty (no mention found) or `"<number> <unit>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetricResult {
    pub weight: String,
    pub height: String,
}

impl HealthMetricResult {
    /// Rendered value for a dimension.
    pub fn get(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Weight => &self.weight,
            Dimension::Height => &self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_empty() && self.height.is_empty()
    }
}

/// A free-text clinical note as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub text: String,
}

impl ClinicalNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Check the note against the default length bounds.
    pub fn validate(&self) -> Result<(), NoteError> {
        self.validate_with_limit(MAX_NOTE_CHARS)
    }

    /// Check that the note is non-empty and at most `max_chars` characters.
    pub fn validate_with_limit(&self, max_chars: usize) -> Result<(), NoteError> {
        if self.text.is_empty() {
            return Err(NoteError::Empty);
        }

        let len = self.text.chars().count();
        if len > max_chars {
            return Err(NoteError::TooLong { len, max: max_chars });
        }

        Ok(())
    }
}
