//! Repository trait for topic storage.

use chrono::NaiveDate;

use crate::domain::entities::{NewTopic, Topic};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the `topics` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteTopicRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_topic.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Inserts a new topic with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the `(title, deadline)` pair already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_topic: NewTopic) -> Result<Topic, AppError>;

    /// Finds a topic by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Topic>, AppError>;

    /// Finds a topic by title and deadline. A `None` deadline matches only
    /// topics without a deadline.
    async fn find_by_title_and_deadline(
        &self,
        title: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<Option<Topic>, AppError>;

    /// Lists all topics ordered by id.
    async fn list(&self) -> Result<Vec<Topic>, AppError>;

    /// Sets the progress of a topic. Returns `false` if no topic matched.
    async fn update_progress(&self, id: i64, progress: i64) -> Result<bool, AppError>;

    /// Deletes a topic. Returns `false` if no topic matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all topics.
    async fn count(&self) -> Result<i64, AppError>;
}
