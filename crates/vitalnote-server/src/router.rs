//! HTTP router.
//!
//! `/parse` sits behind the role check; `/health` is open. The body limit
//! covers every route.

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::routes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/parse", post(routes::parse::parse_note))
        .route_layer(axum_mw::from_fn_with_state(state.clone(), auth::require_role));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
