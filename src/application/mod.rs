//! Application layer services implementing business logic.
//!
//! Services consume repository traits and storage primitives and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::topic_service::TopicService`] - Topic CRUD with validation rules
//! - [`services::upload_service::UploadService`] - Secure image ingestion
pub mod services;
