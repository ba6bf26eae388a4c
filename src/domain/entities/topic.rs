//! Domain entity representing a study topic.

use chrono::NaiveDate;

/// Lowest accepted progress value.
pub const MIN_PROGRESS: i64 = 0;

/// Highest accepted progress value.
pub const MAX_PROGRESS: i64 = 100;

/// A topic in a study plan.
///
/// Topics are unique per `(title, deadline)` pair, where two topics without a
/// deadline count as having the same deadline.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub progress: i64,
}

impl Topic {
    pub fn new(id: i64, title: String, deadline: Option<NaiveDate>, progress: i64) -> Self {
        Self {
            id,
            title,
            deadline,
            progress,
        }
    }

    /// Returns true once progress reaches 100%.
    pub fn is_completed(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }
}

/// Input data for creating a new topic.
///
/// New topics always start at zero progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub title: String,
    pub deadline: Option<NaiveDate>,
}
