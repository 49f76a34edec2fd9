//! Health metric extraction module.

mod parser;
pub mod rules;

pub use parser::{parse_magnitude, HealthMetricParser};

pub use crate::error::ExtractionError;
use crate::models::metric::{ClinicalNote, HealthMetricResult};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for health metric extractors.
pub trait HealthMetricExtractor {
    /// Extract weight and height from note text.
    fn extract(&self, text: &str) -> Result<HealthMetricResult>;

    /// Extract weight and height from a clinical note.
    fn extract_note(&self, note: &ClinicalNote) -> Result<HealthMetricResult> {
        self.extract(&note.text)
    }
}

/// Extract weight and height from note text with the default ranges.
pub fn extract_health_metrics(text: &str) -> Result<HealthMetricResult> {
    HealthMetricParser::new().parse(text)
}
