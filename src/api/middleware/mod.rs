//! HTTP middleware for request protection and observability.
//!
//! Layers are assembled in [`crate::routes`]; see there for ordering.

pub mod access_log;
pub mod body_limit;
pub mod cors;
pub mod problem;
pub mod rate_limit;
pub mod request_id;
pub mod tracing;
