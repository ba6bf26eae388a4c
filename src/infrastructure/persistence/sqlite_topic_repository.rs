//! SQLite implementation of the topic repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewTopic, Topic};
use crate::domain::repositories::TopicRepository;
use crate::error::AppError;

/// SQLite repository for the `topics` table.
pub struct SqliteTopicRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteTopicRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for SqliteTopicRepository {
    async fn create(&self, new_topic: NewTopic) -> Result<Topic, AppError> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (title, deadline)
            VALUES (?1, ?2)
            RETURNING id, title, deadline, progress
            "#,
        )
        .bind(&new_topic.title)
        .bind(new_topic.deadline)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(topic)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Topic>, AppError> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, title, deadline, progress
            FROM topics
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(topic)
    }

    async fn find_by_title_and_deadline(
        &self,
        title: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<Option<Topic>, AppError> {
        // `IS` compares NULL deadlines as equal.
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, title, deadline, progress
            FROM topics
            WHERE title = ?1 AND deadline IS ?2
            LIMIT 1
            "#,
        )
        .bind(title)
        .bind(deadline)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(topic)
    }

    async fn list(&self) -> Result<Vec<Topic>, AppError> {
        let topics = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, title, deadline, progress
            FROM topics
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(topics)
    }

    async fn update_progress(&self, id: i64, progress: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE topics SET progress = ?1 WHERE id = ?2")
            .bind(progress)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
