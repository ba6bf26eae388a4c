//! Rejects requests whose declared `Content-Length` exceeds the limit.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::domain::limits::Decision;
use crate::error::AppError;
use crate::state::AppState;

/// Short-circuits oversized requests with `413 Payload Too Large`.
///
/// Only the declared length is inspected. Chunked bodies without a
/// `Content-Length` pass through and are capped by the extractors'
/// `DefaultBodyLimit` instead.
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let declared = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok());

    if let Decision::Rejected { reason } = state.body_guard.check_header(declared) {
        metrics::counter!("http_payload_too_large_total").increment(1);
        tracing::warn!(
            method = %req.method(),
            path = req.uri().path(),
            content_length = declared.unwrap_or("-"),
            "Request body too large"
        );
        return Err(AppError::payload_too_large(reason));
    }

    Ok(next.run(req).await)
}
