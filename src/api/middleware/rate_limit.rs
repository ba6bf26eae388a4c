//! Per-client sliding-window rate limiting.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::limits::{Decision, SlidingWindowLimiter};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_key;

/// Admits or rejects a request against the shared limiter.
///
/// # Key Extraction
///
/// The client key is the peer IP address. With `behind_proxy` enabled the
/// first `X-Forwarded-For` entry or `X-Real-IP` is used instead. Requests
/// without any address share the `unknown` key.
///
/// Requests over the limit receive `429 Too Many Requests` and are not
/// counted. A limit of `0` disables the check.
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.rate_limiter.is_enabled() {
        return Ok(next.run(req).await);
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(req.headers(), peer, state.behind_proxy);

    if let Decision::Rejected { reason } = state.rate_limiter.evaluate(&client) {
        metrics::counter!("http_rate_limited_total").increment(1);
        tracing::warn!(client = %client, path = req.uri().path(), "Rate limit exceeded");
        return Err(AppError::too_many_requests(reason));
    }

    Ok(next.run(req).await)
}

/// Spawns a task that drops idle clients once per window.
pub fn spawn_purge_task(limiter: Arc<SlidingWindowLimiter>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(limiter.window());
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let purged = limiter.purge_idle();
            if purged > 0 {
                tracing::debug!(
                    purged,
                    remaining = limiter.tracked_clients(),
                    "Purged idle rate-limit clients"
                );
            }
        }
    })
}
