//! # Study Plan
//!
//! A small study-topic tracker built with Axum and SQLite, hardened with
//! request limits and a secure image upload path.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Topic entity, repository trait, and the
//!   rate/body limit decision logic
//! - **Application Layer** ([`application`]) - Business rules for topics and uploads
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite, confined file
//!   storage, outbound HTTP
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Topic CRUD with deadline and progress rules
//! - Per-client sliding-window rate limiting and request body guard
//! - PNG/JPEG uploads confined to one directory, symlink and traversal safe
//! - RFC 7807 problem details with request correlation ids
//! - CORS allow-list, structured logging with sensitive field masking
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://studyplan.db"
//! export APP_RATE_LIMIT_RPM=120
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{TopicService, UploadService};
    pub use crate::domain::entities::{NewTopic, Topic};
    pub use crate::domain::limits::{BodySizeGuard, Decision, SlidingWindowLimiter};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
