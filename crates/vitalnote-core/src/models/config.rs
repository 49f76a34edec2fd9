//! Configuration structures for the extraction pipeline and its callers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VitalNoteError};
use crate::models::metric::MAX_NOTE_CHARS;

/// Main configuration for vitalnote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalNoteConfig {
    /// Metric extraction configuration.
    pub extraction: ExtractionConfig,

    /// Note precondition configuration.
    pub note: NoteConfig,

    /// HTTP service configuration.
    pub server: ServerConfig,
}

/// Inclusive numeric bounds for a dimension, in its canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibleRange {
    pub min: f64,
    pub max: f64,
}

impl PlausibleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when both bounds are finite and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// True when `value` is finite and within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Default weight bounds in kg. 635 kg is roughly the heaviest recorded human.
pub const WEIGHT_RANGE_KG: PlausibleRange = PlausibleRange::new(1.0, 635.0);

/// Default height bounds in cm. 272 cm is roughly the tallest recorded human.
pub const HEIGHT_RANGE_CM: PlausibleRange = PlausibleRange::new(20.0, 272.0);

/// Metric extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Accepted weight range in kg.
    pub weight_range: PlausibleRange,

    /// Accepted height range in cm.
    pub height_range: PlausibleRange,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            weight_range: WEIGHT_RANGE_KG,
            height_range: HEIGHT_RANGE_CM,
        }
    }
}

/// Note precondition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    /// Maximum note length in characters.
    pub max_chars: usize,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            max_chars: MAX_NOTE_CHARS,
        }
    }
}

/// HTTP service configuration.
///
/// The token signing secret is read from the environment, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub listen_addr: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,

    /// Role claim a bearer token must carry to call `/parse`.
    pub required_role: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            max_body_bytes: 64 * 1024,
            required_role: "CLINICAL-EDITOR".to_string(),
        }
    }
}

impl VitalNoteConfig {
    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| VitalNoteError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no note could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("extraction.weight_range", &self.extraction.weight_range),
            ("extraction.height_range", &self.extraction.height_range),
        ];
        for (key, range) in ranges {
            if !range.is_valid() {
                return Err(VitalNoteError::Config(format!(
                    "{} must have finite bounds with min <= max, got min {} and max {}",
                    key, range.min, range.max
                )));
            }
        }

        if self.note.max_chars == 0 {
            return Err(VitalNoteError::Config(
                "note.max_chars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(WEIGHT_RANGE_KG.contains(1.0));
        assert!(WEIGHT_RANGE_KG.contains(635.0));
        assert!(!WEIGHT_RANGE_KG.contains(0.999));
        assert!(!WEIGHT_RANGE_KG.contains(635.001));

        assert!(HEIGHT_RANGE_CM.contains(20.0));
        assert!(HEIGHT_RANGE_CM.contains(272.0));
        assert!(!HEIGHT_RANGE_CM.contains(19.99));
        assert!(!HEIGHT_RANGE_CM.contains(272.01));
    }

    #[test]
    fn test_range_rejects_non_finite() {
        assert!(!WEIGHT_RANGE_KG.contains(f64::NAN));
        assert!(!WEIGHT_RANGE_KG.contains(f64::INFINITY));
        assert!(!HEIGHT_RANGE_CM.contains(f64::NEG_INFINITY));
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: VitalNoteConfig =
            serde_json::from_str(r#"{"server": {"listen_addr": "127.0.0.1:9000"}}"#).unwrap();

        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.server.max_body_bytes, 65536);
        assert_eq!(config.extraction.weight_range, WEIGHT_RANGE_KG);
        assert_eq!(config.note.max_chars, 500);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VitalNoteConfig::default();
        config.extraction.height_range = PlausibleRange::new(30.0, 250.0);
        config.save(&path).unwrap();

        let loaded = VitalNoteConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.height_range, PlausibleRange::new(30.0, 250.0));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = VitalNoteConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, VitalNoteError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = VitalNoteConfig::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, VitalNoteError::Io(_)));
    }

    #[test]
    fn test_inverted_range_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"extraction": {"weight_range": {"min": 700.0, "max": 635.0}}}"#,
        )
        .unwrap();

        let err = VitalNoteConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("extraction.weight_range"));
    }

    #[test]
    fn test_validate() {
        assert!(VitalNoteConfig::default().validate().is_ok());

        let mut config = VitalNoteConfig::default();
        config.extraction.height_range = PlausibleRange::new(f64::NAN, 272.0);
        assert!(config.validate().is_err());

        let mut config = VitalNoteConfig::default();
        config.note.max_chars = 0;
        assert!(config.validate().is_err());

        let mut config = VitalNoteConfig::default();
        config.extraction.weight_range = PlausibleRange::new(50.0, 50.0);
        assert!(config.validate().is_ok());
    }
}
