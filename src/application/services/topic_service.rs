//! Topic management service.

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::domain::entities::{MAX_PROGRESS, MIN_PROGRESS, NewTopic, Topic};
use crate::domain::repositories::TopicRepository;
use crate::error::AppError;

/// Service enforcing the business rules for study topics.
///
/// - Titles are trimmed and must not be blank
/// - Deadlines may not lie in the past
/// - A `(title, deadline)` pair may only exist once
/// - Progress stays within `0..=100`
pub struct TopicService<R: TopicRepository> {
    repository: Arc<R>,
}

impl<R: TopicRepository> TopicService<R> {
    /// Creates a new topic service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a topic, validating it against today's local date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is blank or the deadline is past.
    /// Returns [`AppError::Conflict`] if the topic already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_topic(
        &self,
        title: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<Topic, AppError> {
        self.create_topic_on(title, deadline, Local::now().date_naive())
            .await
    }

    /// Creates a topic, validating the deadline against `today`.
    pub async fn create_topic_on(
        &self,
        title: &str,
        deadline: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Topic, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }

        if let Some(deadline) = deadline
            && deadline < today
        {
            return Err(AppError::validation("Deadline cannot be in the past"));
        }

        if self
            .repository
            .find_by_title_and_deadline(title, deadline)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Topic duplicate"));
        }

        let topic = self
            .repository
            .create(NewTopic {
                title: title.to_string(),
                deadline,
            })
            .await?;

        tracing::info!(topic_id = topic.id, "Topic created");
        Ok(topic)
    }

    /// Lists all topics.
    pub async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a topic by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the topic does not exist.
    pub async fn get_topic(&self, id: i64) -> Result<Topic, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Topic not found"))
    }

    /// Sets the progress of a topic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `progress` is outside `0..=100`.
    /// Returns [`AppError::NotFound`] if the topic does not exist.
    pub async fn update_progress(&self, id: i64, progress: i64) -> Result<(), AppError> {
        if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
            return Err(AppError::validation(format!(
                "Progress must be between {MIN_PROGRESS} and {MAX_PROGRESS}"
            )));
        }

        if !self.repository.update_progress(id, progress).await? {
            return Err(AppError::not_found("Topic not found"));
        }

        Ok(())
    }

    /// Deletes a topic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the topic does not exist.
    pub async fn delete_topic(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Topic not found"));
        }

        tracing::info!(topic_id = id, "Topic deleted");
        Ok(())
    }

    /// Counts stored topics. Used by health checks.
    pub async fn count_topics(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTopicRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    #[tokio::test]
    async fn test_create_topic_success() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_find_by_title_and_deadline()
            .withf(|title, deadline| title == "Math" && deadline.is_none())
            .times(1)
            .returning(|_, _| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_topic| new_topic.title == "Math")
            .times(1)
            .returning(|n| Ok(Topic::new(1, n.title, n.deadline, 0)));

        let service = TopicService::new(Arc::new(mock_repo));

        let topic = service.create_topic_on("  Math ", None, today()).await.unwrap();

        assert_eq!(topic.id, 1);
        assert_eq!(topic.title, "Math");
        assert_eq!(topic.progress, 0);
    }

    #[tokio::test]
    async fn test_create_topic_blank_title() {
        let mock_repo = MockTopicRepository::new();
        let service = TopicService::new(Arc::new(mock_repo));

        let result = service.create_topic_on("   ", None, today()).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_topic_past_deadline() {
        let mock_repo = MockTopicRepository::new();
        let service = TopicService::new(Arc::new(mock_repo));

        let result = service
            .create_topic_on("History", Some(date(2000, 1, 1)), today())
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Deadline cannot be in the past");
    }

    #[tokio::test]
    async fn test_create_topic_deadline_today_allowed() {
        let mut mock_repo = MockTopicRepository::new();
        mock_repo
            .expect_find_by_title_and_deadline()
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_create()
            .returning(|n| Ok(Topic::new(7, n.title, n.deadline, 0)));

        let service = TopicService::new(Arc::new(mock_repo));

        let topic = service
            .create_topic_on("Today", Some(today()), today())
            .await
            .unwrap();

        assert_eq!(topic.deadline, Some(today()));
    }

    #[tokio::test]
    async fn test_create_topic_duplicate() {
        let mut mock_repo = MockTopicRepository::new();
        mock_repo
            .expect_find_by_title_and_deadline()
            .times(1)
            .returning(|t, d| Ok(Some(Topic::new(3, t.to_string(), d, 10))));
        mock_repo.expect_create().never();

        let service = TopicService::new(Arc::new(mock_repo));

        let result = service
            .create_topic_on("X", Some(date(2025, 12, 31)), today())
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(err.to_string().to_lowercase().contains("duplicate"));
    }

    #[tokio::test]
    async fn test_get_topic_not_found() {
        let mut mock_repo = MockTopicRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = TopicService::new(Arc::new(mock_repo));

        let result = service.get_topic(9999).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_progress_out_of_range() {
        let mut mock_repo = MockTopicRepository::new();
        mock_repo.expect_update_progress().never();

        let service = TopicService::new(Arc::new(mock_repo));

        for value in [-1, 101, 150] {
            let result = service.update_progress(1, value).await;
            assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
        }
    }

    #[tokio::test]
    async fn test_update_progress_missing_topic() {
        let mut mock_repo = MockTopicRepository::new();
        mock_repo
            .expect_update_progress()
            .withf(|id, progress| *id == 42 && *progress == 50)
            .times(1)
            .returning(|_, _| Ok(false));

        let service = TopicService::new(Arc::new(mock_repo));

        let result = service.update_progress(42, 50).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_topic() {
        let mut mock_repo = MockTopicRepository::new();
        mock_repo
            .expect_delete()
            .times(2)
            .returning(|id| Ok(id == 1));

        let service = TopicService::new(Arc::new(mock_repo));

        assert!(service.delete_topic(1).await.is_ok());
        assert!(matches!(
            service.delete_topic(2).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
