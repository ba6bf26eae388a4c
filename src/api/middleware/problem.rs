//! Finalizes problem details with request-specific members.
//!
//! [`crate::error::AppError`] responses carry their [`ProblemDetails`] as a
//! response extension. This layer re-renders that body with `instance` (the
//! request URI) and `correlation_id` (the `X-Request-ID`, or a fresh UUID
//! when the header is absent). Bare error responses without a body, such as
//! axum's own 404/405, are turned into problem details as well.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, header, response::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::request_id::request_id;
use crate::error::{PROBLEM_JSON, ProblemDetails};

pub async fn layer(req: Request, next: Next) -> Response {
    let instance = req.uri().to_string();
    let correlation_id = request_id(req.headers())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let response = next.run(req).await;
    let (mut parts, body) = response.into_parts();

    let problem = match parts.extensions.remove::<ProblemDetails>() {
        Some(problem) => problem,
        None if is_bare_error(&parts) => ProblemDetails::from_status(parts.status),
        None => return Response::from_parts(parts, body),
    };

    let problem = ProblemDetails {
        instance: Some(instance),
        correlation_id: Some(correlation_id),
        ..problem
    };

    match serde_json::to_vec(&problem) {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            parts
                .headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
            parts.extensions.insert(problem);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize problem details");
            parts.extensions.insert(problem);
            Response::from_parts(parts, body)
        }
    }
}

fn is_bare_error(parts: &Parts) -> bool {
    (parts.status.is_client_error() || parts.status.is_server_error())
        && !parts.headers.contains_key(header::CONTENT_TYPE)
}
