//! DTOs for topic endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::Topic;

/// Request to create a study topic.
///
/// `title` is optional at the serde level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(
        required(message = "field required"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    /// ISO date (`YYYY-MM-DD`); must not be in the past.
    pub deadline: Option<NaiveDate>,
}

/// Request to set the progress of a topic.
#[derive(Debug, Deserialize, Validate)]
pub struct ProgressUpdateRequest {
    #[validate(
        required(message = "field required"),
        range(min = 0, max = 100, message = "Progress must be between 0 and 100")
    )]
    pub progress: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub progress: i64,
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            title: topic.title,
            deadline: topic.deadline,
            progress: topic.progress,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Title must not be empty".into());
        return Err(error);
    }
    Ok(())
}
