//! Health metric parser: match, normalize, validate, format.

use tracing::{debug, info, warn};

use crate::models::config::{ExtractionConfig, PlausibleRange, HEIGHT_RANGE_CM, WEIGHT_RANGE_KG};
use crate::models::metric::{Dimension, HealthMetricResult, Measurement};

use super::rules::{
    format_measurement, normalize_unit, to_canonical, validate_measurement, FieldExtractor,
    MentionExtractor,
};
use super::{ExtractionError, HealthMetricExtractor, Result};

/// Rule-based parser for weight and height mentions.
///
/// Stateless apart from its ranges, so one instance can serve any number of
/// threads.
#[derive(Debug, Clone)]
pub struct HealthMetricParser {
    /// Accepted weight range in kg.
    weight_range: PlausibleRange,
    /// Accepted height range in cm.
    height_range: PlausibleRange,
}

impl HealthMetricParser {
    /// Create a new parser with the default plausible ranges.
    pub fn new() -> Self {
        Self {
            weight_range: WEIGHT_RANGE_KG,
            height_range: HEIGHT_RANGE_CM,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_weight_range(config.weight_range)
            .with_height_range(config.height_range)
    }

    /// Set the accepted weight range (kg).
    pub fn with_weight_range(mut self, range: PlausibleRange) -> Self {
        self.weight_range = range;
        self
    }

    /// Set the accepted height range (cm).
    pub fn with_height_range(mut self, range: PlausibleRange) -> Self {
        self.height_range = range;
        self
    }

    pub fn range(&self, dimension: Dimension) -> &PlausibleRange {
        match dimension {
            Dimension::Weight => &self.weight_range,
            Dimension::Height => &self.height_range,
        }
    }

    /// Extract the first mention of `dimension` as a validated canonical measurement.
    ///
    /// Returns `Ok(None)` when the note has no recognizable mention. The value
    /// is not rounded.
    pub fn extract_metric(&self, dimension: Dimension, text: &str) -> Result<Option<Measurement>> {
        let Some(found) = MentionExtractor::new(dimension).extract(text) else {
            return Ok(None);
        };

        debug!(
            dimension = %dimension,
            source = %found.source,
            "matched {} mention",
            dimension
        );

        let magnitude = parse_magnitude(dimension, &found.value.number)?;
        let unit = normalize_unit(dimension, &found.value.unit_token).unwrap_or_else(|| {
            warn!(
                "unrecognized {} unit {:?}, leaving value unconverted",
                dimension, found.value.unit_token
            );
            dimension.canonical_unit()
        });

        let canonical = to_canonical(Measurement::new(magnitude, unit));
        validate_measurement(canonical, self.range(dimension)).map(Some)
    }

    /// Extract weight then height from a note.
    ///
    /// Any error aborts the call; a weight error means height is never examined.
    pub fn parse(&self, text: &str) -> Result<HealthMetricResult> {
        let mut result = HealthMetricResult::default();

        for dimension in [Dimension::Weight, Dimension::Height] {
            let measurement = self.extract_metric(dimension, text).inspect_err(|e| {
                info!("error encountered extracting {} metric: {}", dimension, e);
            })?;

            if let Some(measurement) = measurement {
                let rendered = format_measurement(&measurement);
                match dimension {
                    Dimension::Weight => result.weight = rendered,
                    Dimension::Height => result.height = rendered,
                }
            }
        }

        Ok(result)
    }
}

impl Default for HealthMetricParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthMetricExtractor for HealthMetricParser {
    fn extract(&self, text: &str) -> Result<HealthMetricResult> {
        self.parse(text)
    }
}

/// Parse a captured number as a base-10 float.
pub fn parse_magnitude(dimension: Dimension, number: &str) -> Result<f64> {
    number.parse::<f64>().map_err(|_| ExtractionError::Parse {
        dimension,
        value: number.to_string(),
    })
}
