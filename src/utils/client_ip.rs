//! Client identification for per-client rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Key used when no client address is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Derives the rate-limit key for a request.
///
/// Uses the socket peer IP. When `behind_proxy` is set, the first
/// `X-Forwarded-For` entry (then `X-Real-IP`) takes precedence; enable this
/// only behind a trusted reverse proxy, as the headers are client-controlled
/// otherwise.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_key(&headers, None, true), "203.0.113.7");
/// assert_eq!(client_key(&headers, None, false), "unknown");
/// ```
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> String {
    if behind_proxy && let Some(ip) = forwarded_ip(headers) {
        return ip;
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let from_forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let from_real_ip = || {
        headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    from_forwarded.or_else(from_real_ip).map(str::to_string)
}
