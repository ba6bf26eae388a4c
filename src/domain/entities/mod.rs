//! Core domain entities.
//!
//! - [`Topic`] - A study topic with optional deadline and progress
//! - [`NewTopic`] - Input for creating a topic

pub mod topic;

pub use topic::{MAX_PROGRESS, MIN_PROGRESS, NewTopic, Topic};
