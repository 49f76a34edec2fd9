//! Plausible range validation for canonical measurements.

use super::format::round;
use crate::error::ExtractionError;
use crate::models::config::PlausibleRange;
use crate::models::metric::Measurement;

/// Check a canonical measurement against its dimension's range.
///
/// The error carries the converted value rounded to two decimals, whatever
/// the dimension's display precision.
pub fn validate_measurement(
    measurement: Measurement,
    range: &PlausibleRange,
) -> Result<Measurement, ExtractionError> {
    if range.contains(measurement.magnitude) {
        return Ok(measurement);
    }

    Err(ExtractionError::Range {
        dimension: measurement.dimension(),
        value: round(measurement.magnitude, 2),
        unit: measurement.unit.symbol(),
    })
}
