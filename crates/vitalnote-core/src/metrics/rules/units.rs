//! Unit token normalization and conversion to canonical units.

use crate::models::metric::{Dimension, Measurement, Unit};

/// Kilograms per avoirdupois pound.
pub const KG_PER_LB: f64 = 0.45359237;
/// Centimetres per international foot.
pub const CM_PER_FT: f64 = 30.48;
/// Centimetres per inch.
pub const CM_PER_IN: f64 = 2.54;

/// Map a surface-form unit token (e.g. "kgs", "Feet") to its canonical short form.
///
/// Returns `None` for tokens not recognized for the given dimension.
pub fn normalize_unit(dimension: Dimension, token: &str) -> Option<Unit> {
    let token = token.to_lowercase();

    match dimension {
        Dimension::Weight => match token.as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(Unit::Kilogram),
            "lb" | "lbs" | "pound" | "pounds" => Some(Unit::Pound),
            _ => None,
        },
        Dimension::Height => match token.as_str() {
            "cm" => Some(Unit::Centimetre),
            "mm" => Some(Unit::Millimetre),
            "m" | "meter" | "meters" | "metre" | "metres" => Some(Unit::Metre),
            "ft" | "feet" | "foot" => Some(Unit::Foot),
            "in" | "inch" | "inches" => Some(Unit::Inch),
            _ => None,
        },
    }
}

/// Convert a measurement to its dimension's canonical unit (kg or cm).
///
/// Feet are taken as decimal feet: "5.9 ft" is 5.9 × 30.48 cm, not 5'9".
pub fn to_canonical(measurement: Measurement) -> Measurement {
    let value = measurement.magnitude;

    let converted = match measurement.unit {
        Unit::Kilogram | Unit::Centimetre => value,
        Unit::Pound => value * KG_PER_LB,
        Unit::Millimetre => value / 10.0,
        Unit::Metre => value * 100.0,
        Unit::Foot => value * CM_PER_FT,
        Unit::Inch => value * CM_PER_IN,
    };

    Measurement::new(converted, measurement.dimension().canonical_unit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_normalize_weight_tokens() {
        for token in ["kg", "kgs", "kilogram", "KILOGRAMS"] {
            assert_eq!(normalize_unit(Dimension::Weight, token), Some(Unit::Kilogram));
        }
        for token in ["lb", "Lbs", "pound", "pounds"] {
            assert_eq!(normalize_unit(Dimension::Weight, token), Some(Unit::Pound));
        }
        assert_eq!(normalize_unit(Dimension::Weight, "cm"), None);
    }

    #[test]
    fn test_normalize_height_tokens() {
        assert_eq!(normalize_unit(Dimension::Height, "CM"), Some(Unit::Centimetre));
        assert_eq!(normalize_unit(Dimension::Height, "mm"), Some(Unit::Millimetre));
        for token in ["m", "meter", "meters", "metre", "metres"] {
            assert_eq!(normalize_unit(Dimension::Height, token), Some(Unit::Metre));
        }
        for token in ["ft", "feet", "foot"] {
            assert_eq!(normalize_unit(Dimension::Height, token), Some(Unit::Foot));
        }
        for token in ["in", "inch", "inches"] {
            assert_eq!(normalize_unit(Dimension::Height, token), Some(Unit::Inch));
        }
        assert_eq!(normalize_unit(Dimension::Height, "kg"), None);
    }

    #[test]
    fn test_weight_conversion() {
        let kg = to_canonical(Measurement::new(75.0, Unit::Kilogram));
        assert_eq!(kg, Measurement::new(75.0, Unit::Kilogram));

        let lb = to_canonical(Measurement::new(165.34, Unit::Pound));
        assert_eq!(lb.unit, Unit::Kilogram);
        assert_close(lb.magnitude, 165.34 * 0.45359237);
    }

    #[test]
    fn test_height_conversion() {
        assert_close(to_canonical(Measurement::new(1800.0, Unit::Millimetre)).magnitude, 180.0);
        assert_close(to_canonical(Measurement::new(1.8, Unit::Metre)).magnitude, 180.0);
        assert_close(to_canonical(Measurement::new(75.0, Unit::Inch)).magnitude, 190.5);
        assert_close(to_canonical(Measurement::new(75.0, Unit::Foot)).magnitude, 2286.0);
        assert_eq!(to_canonical(Measurement::new(180.0, Unit::Centimetre)).unit, Unit::Centimetre);
    }

    #[test]
    fn test_decimal_feet_are_not_feet_and_inches() {
        let converted = to_canonical(Measurement::new(5.9, Unit::Foot));
        assert_close(converted.magnitude, 5.9 * 30.48);
    }
}
