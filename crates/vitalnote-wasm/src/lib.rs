//! WASM bindings for clinical note health metric extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use vitalnote_core::{ClinicalNote, HealthMetricParser, PlausibleRange};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract weight and height from note text.
///
/// Resolves to `{ weight, height }`; throws the extraction error message on
/// out-of-range values.
#[wasm_bindgen(js_name = extractHealthMetrics)]
pub fn extract_health_metrics(text: &str) -> Result<JsValue, JsValue> {
    let metrics = vitalnote_core::extract_health_metrics(text)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&metrics).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check the note length preconditions (1 to 500 characters).
#[wasm_bindgen(js_name = validateNote)]
pub fn validate_note(text: &str) -> bool {
    ClinicalNote::new(text).validate().is_ok()
}

/// Extractor class with configurable plausible ranges.
#[wasm_bindgen]
pub struct MetricExtractor {
    parser: HealthMetricParser,
}

#[wasm_bindgen]
impl MetricExtractor {
    /// Create an extractor with the default ranges.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: HealthMetricParser::new(),
        }
    }

    /// Set the accepted weight range in kg.
    #[wasm_bindgen(js_name = setWeightRange)]
    pub fn set_weight_range(&mut self, min: f64, max: f64) {
        self.parser = self
            .parser
            .clone()
            .with_weight_range(PlausibleRange::new(min, max));
    }

    /// Set the accepted height range in cm.
    #[wasm_bindgen(js_name = setHeightRange)]
    pub fn set_height_range(&mut self, min: f64, max: f64) {
        self.parser = self
            .parser
            .clone()
            .with_height_range(PlausibleRange::new(min, max));
    }

    /// Extract metrics from note text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let metrics = self
            .parser
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&metrics).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn field(value: &JsValue, name: &str) -> String {
        js_sys::Reflect::get(value, &JsValue::from_str(name))
            .unwrap()
            .as_string()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_extract_health_metrics() {
        let value = extract_health_metrics("patient weight is 165.34lb").unwrap();
        assert_eq!(field(&value, "weight"), "75 kg");
        assert_eq!(field(&value, "height"), "");
    }

    #[wasm_bindgen_test]
    fn test_extract_error_message() {
        let err = extract_health_metrics("height of 75feet").unwrap_err();
        assert_eq!(err.as_string().unwrap(), "invalid height of 2286 cm");
    }

    #[wasm_bindgen_test]
    fn test_validate_note() {
        assert!(validate_note("weight of 75 kg"));
        assert!(!validate_note(""));
        assert!(!validate_note(&"a".repeat(501)));
    }

    #[wasm_bindgen_test]
    fn test_custom_weight_range() {
        let mut extractor = MetricExtractor::new();
        assert!(extractor.extract("weight of 0.5 kg").is_err());

        extractor.set_weight_range(0.3, 200.0);
        let value = extractor.extract("weight of 0.5 kg").unwrap();
        assert_eq!(field(&value, "weight"), "0.5 kg");
    }
}
