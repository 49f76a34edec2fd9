//! Bearer token role checks.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::AppState;

/// Claims carried by an API bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleClaims {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("invalid authorization header")]
    InvalidHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token role {actual:?} does not match {required:?}")]
    WrongRole { required: String, actual: String },
}

/// Validates HMAC-signed bearer tokens.
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // `exp` is checked when present but not required
        validation.required_spec_claims.clear();
        // Tokens are bound by role, not audience
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and verify a raw token.
    pub fn validate(&self, token: &str) -> Result<RoleClaims, AuthError> {
        Ok(decode::<RoleClaims>(token, &self.key, &self.validation)?.claims)
    }

    /// Check an `Authorization` header value for a token carrying `role`.
    pub fn has_role(&self, header_value: Option<&str>, role: &str) -> Result<RoleClaims, AuthError> {
        let header_value = header_value
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::MissingHeader)?;

        let (scheme, token) = header_value
            .split_once(' ')
            .ok_or(AuthError::InvalidHeader)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidHeader);
        }

        let claims = self.validate(token)?;
        if claims.role != role {
            return Err(AuthError::WrongRole {
                required: role.to_string(),
                actual: claims.role,
            });
        }

        Ok(claims)
    }
}

/// Middleware rejecting requests whose token lacks the configured role.
pub async fn require_role(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.tokens.has_role(header_value, &state.required_role) {
        Ok(claims) => {
            tracing::debug!(sub = ?claims.sub, "authorized request");
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!("rejected request: {e}");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
