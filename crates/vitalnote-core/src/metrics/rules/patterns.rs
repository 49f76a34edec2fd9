//! Compiled patterns for health metric mentions.
//!
//! Both patterns share one shape: a keyword, an optional connector
//! (`of`, `is`, `at` or `:`), a number and a unit token. Group 1 is the
//! number, group 2 the unit token.
//!
//! Word boundaries and whitespace are ASCII-only: letters such as `é` count
//! as non-word characters and a non-breaking space does not separate tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Weight: "weight of 75 kg", "wt: 165.34lbs", "weighs 80 kilograms"
    pub static ref WEIGHT_PATTERN: Regex = Regex::new(
        r"(?i)(?-u:\b)(?:weight|wt|weighs)[ \t\n\f\r]*(?:of|is|at|:)?[ \t\n\f\r]*([0-9]{1,4}(?:\.[0-9]{1,2})?)[ \t\n\f\r]*(kg|kgs|kilogram|kilograms|lb|lbs|pound|pounds)(?-u:\b)"
    ).unwrap();

    // Height: "height of 180cm", "ht is 5.9 ft", "height at 1.75 metres"
    pub static ref HEIGHT_PATTERN: Regex = Regex::new(
        r"(?i)(?-u:\b)(?:height|ht)[ \t\n\f\r]*(?:of|is|at|:)?[ \t\n\f\r]*([0-9]{1,5}(?:\.[0-9]{1,2})?)[ \t\n\f\r]*(cm|mm|m|metre|metres|meter|meters|ft|feet|foot|in|inch|inches)(?-u:\b)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captures<'a>(pattern: &Regex, text: &'a str) -> Option<(&'a str, &'a str)> {
        pattern.captures(text).map(|caps| {
            (
                caps.get(1).unwrap().as_str(),
                caps.get(2).unwrap().as_str(),
            )
        })
    }

    #[test]
    fn test_weight_keywords_and_connectors() {
        assert_eq!(captures(&WEIGHT_PATTERN, "weight of 75 kg"), Some(("75", "kg")));
        assert_eq!(captures(&WEIGHT_PATTERN, "wt: 75kg"), Some(("75", "kg")));
        assert_eq!(captures(&WEIGHT_PATTERN, "weighs 75 kg"), Some(("75", "kg")));
        assert_eq!(captures(&WEIGHT_PATTERN, "weight at 75kgs"), Some(("75", "kgs")));
        assert_eq!(captures(&WEIGHT_PATTERN, "weight 75 pounds"), Some(("75", "pounds")));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(captures(&WEIGHT_PATTERN, "WEIGHT IS 75 KG"), Some(("75", "KG")));
        assert_eq!(captures(&HEIGHT_PATTERN, "Height Of 180 Cm"), Some(("180", "Cm")));
    }

    #[test]
    fn test_height_long_unit_forms() {
        assert_eq!(captures(&HEIGHT_PATTERN, "height of 75 inches"), Some(("75", "inches")));
        assert_eq!(captures(&HEIGHT_PATTERN, "height of 1.8 meters"), Some(("1.8", "meters")));
        assert_eq!(captures(&HEIGHT_PATTERN, "height of 1.8m"), Some(("1.8", "m")));
        assert_eq!(captures(&HEIGHT_PATTERN, "ht 6 foot"), Some(("6", "foot")));
        assert_eq!(captures(&HEIGHT_PATTERN, "height is 1800mm"), Some(("1800", "mm")));
    }

    #[test]
    fn test_keyword_must_start_a_word() {
        // "ht" inside "weight" is not a height keyword
        assert!(HEIGHT_PATTERN.find("weight 75 m").is_none());
        assert!(WEIGHT_PATTERN.find("newt 5 kg").is_none());
    }

    #[test]
    fn test_unknown_connector_does_not_match() {
        assert!(HEIGHT_PATTERN.find("height approximately 100cm").is_none());
        assert!(WEIGHT_PATTERN.find("weight was 75 kg").is_none());
    }

    #[test]
    fn test_unknown_unit_does_not_match() {
        assert!(WEIGHT_PATTERN.find("weight of 75 stone").is_none());
        assert!(HEIGHT_PATTERN.find("height of 2 yards").is_none());
        // unit must end at a word boundary
        assert!(WEIGHT_PATTERN.find("weight of 75 kgx").is_none());
    }

    #[test]
    fn test_boundaries_and_spacing_are_ascii() {
        assert_eq!(captures(&WEIGHT_PATTERN, "weight of 75 kg\u{e9}"), Some(("75", "kg")));
        assert_eq!(captures(&HEIGHT_PATTERN, "\u{e9}height of 180 cm"), Some(("180", "cm")));
        assert!(WEIGHT_PATTERN.find("weight\u{a0}of 75 kg").is_none());
        assert!(HEIGHT_PATTERN.find("height of 180\u{a0}cm").is_none());
        assert_eq!(captures(&WEIGHT_PATTERN, "weight\tof\n75\r\nkg"), Some(("75", "kg")));
    }

    #[test]
    fn test_fraction_limited_to_two_digits() {
        assert_eq!(captures(&WEIGHT_PATTERN, "weight of 165.34lb"), Some(("165.34", "lb")));
        assert!(WEIGHT_PATTERN.find("weight of 0.999 kg").is_none());
    }
}
