//! Top-level router configuration.
//!
//! # Middleware
//!
//! Layers from outermost to innermost:
//!
//! 1. **Request id** - keep or assign `X-Request-ID`
//! 2. **Tracing** - request span tagged with the request id
//! 3. **Request id propagation** - echo `X-Request-ID` on the response
//! 4. **CORS** - origin allow-list
//! 5. **Problem finalizer** - `instance` and `correlation_id` on error bodies
//! 6. **Rate limiter** - `429` per client over the sliding window
//! 7. **Body guard** - `413` on oversized `Content-Length`
//! 8. **Access log** - request/response lines with masked JSON bodies
//! 9. **Streaming cap** - `DefaultBodyLimit` for bodies without a length
//!
//! Trailing slashes are trimmed before routing.

use crate::api::middleware::{access_log, body_limit, cors, problem, rate_limit, request_id};
use crate::api::{self, middleware::tracing as trace};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every middleware layer applied.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origins` - origins allowed to make cross-origin calls
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let body_cap = usize::try_from(state.body_guard.max_body_bytes()).unwrap_or(usize::MAX);

    api::routes::api_routes()
        .layer(DefaultBodyLimit::max(body_cap))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            body_limit::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(middleware::from_fn(problem::layer))
        .layer(cors::layer(cors_origins))
        .layer(request_id::propagate_layer())
        .layer(trace::layer())
        .layer(request_id::set_layer())
        .with_state(state)
}

/// Constructs the application service with path normalization.
pub fn app_router(state: AppState, cors_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_origins))
}
