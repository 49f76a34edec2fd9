//! Core library for clinical note health metric extraction.
//!
//! This crate provides:
//! - Keyword-anchored detection of weight and height mentions in free text
//! - Unit normalization to kg and cm
//! - Plausible range validation
//! - Canonical `"<value> <unit>"` rendering of the results

pub mod error;
pub mod metrics;
pub mod models;

pub use error::{ExtractionError, NoteError, Result, VitalNoteError};
pub use metrics::{extract_health_metrics, HealthMetricExtractor, HealthMetricParser};
pub use models::config::{PlausibleRange, VitalNoteConfig};
pub use models::metric::{ClinicalNote, Dimension, HealthMetricResult, Measurement, Unit};
