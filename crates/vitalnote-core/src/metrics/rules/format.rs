//! Rounding and rendering of canonical measurements.

use crate::models::metric::Measurement;

/// Round to `precision` decimal places, halves away from zero.
pub fn round(value: f64, precision: i32) -> f64 {
    let p = 10f64.powi(precision);
    (value * p).round() / p
}

/// Print a number in its shortest round-trip form.
///
/// Magnitudes of a million and up, or below 1e-4, switch to exponent form
/// with a signed two-digit exponent (`9.9999e+06`).
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e6).contains(&magnitude) {
        return value.to_string();
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

/// Render a canonical measurement as `"<number> <unit>"`.
///
/// The number is rounded to the dimension's precision and printed in its
/// shortest form, so `75.00` becomes `75` and `190.50` becomes `190.5`.
pub fn format_measurement(measurement: &Measurement) -> String {
    let precision = measurement.dimension().precision();
    let value = round(measurement.magnitude, precision);
    format!("{} {}", format_number(value), measurement.unit.symbol())
}
