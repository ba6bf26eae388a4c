//! Handlers for study topic endpoints.

use axum::{Json, extract::State};

use crate::api::dto::StatusResponse;
use crate::api::dto::topic::{CreateTopicRequest, ProgressUpdateRequest, TopicResponse};
use crate::api::extract::{TopicId, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a study topic.
///
/// # Endpoint
///
/// `POST /topics`
///
/// # Request Body
///
/// ```json
/// { "title": "Linear algebra", "deadline": "2030-06-01" }
/// ```
///
/// # Errors
///
/// - **409 Conflict**: same title and deadline already exist
/// - **422 Unprocessable Entity**: missing/blank title, past deadline, bad JSON
pub async fn create_topic_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTopicRequest>,
) -> Result<Json<TopicResponse>, AppError> {
    let title = payload.title.unwrap_or_default();

    let topic = state
        .topic_service
        .create_topic(&title, payload.deadline)
        .await?;

    Ok(Json(topic.into()))
}

/// Lists all topics ordered by id.
///
/// `GET /topics`
pub async fn list_topics_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopicResponse>>, AppError> {
    let topics = state.topic_service.list_topics().await?;

    Ok(Json(topics.into_iter().map(TopicResponse::from).collect()))
}

/// `GET /topics/{id}`
pub async fn get_topic_handler(
    State(state): State<AppState>,
    TopicId(id): TopicId,
) -> Result<Json<TopicResponse>, AppError> {
    let topic = state.topic_service.get_topic(id).await?;

    Ok(Json(topic.into()))
}

/// Sets topic progress.
///
/// # Endpoint
///
/// `PUT /topics/{id}/progress` with `{"progress": 0..=100}`
///
/// # Errors
///
/// - **404 Not Found**: topic does not exist
/// - **422 Unprocessable Entity**: progress missing or out of range
pub async fn update_progress_handler(
    State(state): State<AppState>,
    TopicId(id): TopicId,
    ValidatedJson(payload): ValidatedJson<ProgressUpdateRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let progress = payload.progress.unwrap_or_default();

    state.topic_service.update_progress(id, progress).await?;

    Ok(Json(StatusResponse::ok()))
}

/// `DELETE /topics/{id}`
pub async fn delete_topic_handler(
    State(state): State<AppState>,
    TopicId(id): TopicId,
) -> Result<Json<StatusResponse>, AppError> {
    state.topic_service.delete_topic(id).await?;

    Ok(Json(StatusResponse::deleted()))
}
