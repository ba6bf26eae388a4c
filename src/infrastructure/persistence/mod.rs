//! SQLite persistence.
//!
//! - [`database`] - Pool construction and migrations
//! - [`SqliteTopicRepository`] - Topic storage and retrieval

pub mod database;
pub mod sqlite_topic_repository;

pub use database::{connect, migrate};
pub use sqlite_topic_repository::SqliteTopicRepository;
