//! Access log with masked JSON request bodies.

use axum::{
    body::{Body, to_bytes},
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::{net::SocketAddr, time::Instant};

use crate::domain::limits::BodySizeGuard;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::{client_key, mask_sensitive};

/// Logs each request and its outcome.
///
/// JSON bodies are buffered (up to the body limit), logged with sensitive
/// keys masked, and handed on unchanged.
///
/// # Example Logs
///
/// ```text
/// INFO Request client=127.0.0.1 method=POST path=/topics body={"title":"Rust","password":"****"}
/// INFO Response client=127.0.0.1 method=POST path=/topics status=200 ms=2
/// ```
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let start = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(req.headers(), peer, state.behind_proxy);

    let req = if is_json(req.headers()) {
        let (parts, body) = req.into_parts();
        let limit = usize::try_from(state.body_guard.max_body_bytes()).unwrap_or(usize::MAX);
        let bytes = to_bytes(body, limit)
            .await
            .map_err(|e| body_read_error(&e, &state.body_guard))?;

        let logged = serde_json::from_slice::<Value>(&bytes)
            .map(|body| mask_sensitive(&body))
            .unwrap_or(Value::Null);
        tracing::info!(client = %client, %method, path = %path, body = %logged, "Request");

        Request::from_parts(parts, Body::from(bytes))
    } else {
        tracing::info!(client = %client, %method, path = %path, "Request");
        req
    };

    let response = next.run(req).await;

    tracing::info!(
        client = %client,
        %method,
        path = %path,
        status = response.status().as_u16(),
        ms = start.elapsed().as_millis() as u64,
        "Response"
    );

    Ok(response)
}

/// Only an exceeded length limit is a 413; any other read failure is the
/// client's broken body.
fn body_read_error(err: &axum::Error, guard: &BodySizeGuard) -> AppError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return AppError::payload_too_large(guard.rejection_reason());
        }
        source = e.source();
    }
    AppError::bad_request("Failed to read request body")
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}
