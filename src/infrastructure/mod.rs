//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementations
//! - [`storage`] - Confined filesystem storage for uploads
//! - [`http_client`] - Outbound HTTP with timeouts and retries

pub mod http_client;
pub mod persistence;
pub mod storage;
