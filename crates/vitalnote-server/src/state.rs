use std::sync::Arc;

use vitalnote_core::models::config::VitalNoteConfig;
use vitalnote_core::{HealthMetricExtractor, HealthMetricParser};

use crate::auth::TokenValidator;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn HealthMetricExtractor + Send + Sync>,
    pub tokens: Arc<TokenValidator>,
    pub required_role: String,
    pub max_note_chars: usize,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build state around the rule-based parser configured by `config`.
    pub fn new(config: &VitalNoteConfig, api_secret: &str) -> Self {
        let parser = HealthMetricParser::from_config(&config.extraction);
        Self::with_extractor(config, api_secret, Arc::new(parser))
    }

    pub fn with_extractor(
        config: &VitalNoteConfig,
        api_secret: &str,
        extractor: Arc<dyn HealthMetricExtractor + Send + Sync>,
    ) -> Self {
        Self {
            extractor,
            tokens: Arc::new(TokenValidator::new(api_secret)),
            required_role: config.server.required_role.clone(),
            max_note_chars: config.note.max_chars,
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}
