//! Helpers used across the HTTP layer.
//!
//! - [`client_ip`] - Rate-limit key extraction from peer address and proxy headers
//! - [`mask`] - Masking of sensitive fields in logged request bodies

pub mod client_ip;
pub mod mask;

pub use client_ip::client_key;
pub use mask::mask_sensitive;
