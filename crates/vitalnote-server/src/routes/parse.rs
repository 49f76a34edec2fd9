use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use vitalnote_core::{ClinicalNote, HealthMetricResult};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub text: String,
}

/// Extract weight and height from a clinical note.
///
/// A `null` body or a missing `text` field is treated as an empty note.
pub async fn parse_note(
    State(state): State<AppState>,
    payload: Result<Json<Option<ParseRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<HealthMetricResult>), ApiError> {
    let Json(payload) = payload?;
    let note = ClinicalNote::new(payload.map(|p| p.text).unwrap_or_default());

    note.validate_with_limit(state.max_note_chars)
        .inspect_err(|e| info!("error encountered: invalid clinical note: {e}"))?;

    let metrics = state
        .extractor
        .extract_note(&note)
        .inspect_err(|e| info!("error encountered for service to parse clinical note: {e}"))?;

    Ok((StatusCode::CREATED, Json(metrics)))
}
