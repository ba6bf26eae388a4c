//! Domain layer containing business entities and request limits.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`limits`] - Per-client rate limiting and body size checks
//!
//! The domain layer has no dependencies on the HTTP or persistence layers;
//! business rules live in [`crate::application::services`].

pub mod entities;
pub mod limits;
pub mod repositories;
