//! API route configuration.

use crate::api::handlers::{
    create_topic_handler, delete_topic_handler, get_topic_handler, health_handler,
    list_topics_handler, update_progress_handler, upload_handler,
};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /topics`                - List topics
/// - `POST   /topics`                - Create a topic
/// - `GET    /topics/{id}`           - Fetch a topic
/// - `DELETE /topics/{id}`           - Delete a topic
/// - `PUT    /topics/{id}/progress`  - Set topic progress
/// - `POST   /upload`                - Upload a PNG/JPEG image
/// - `GET    /health`                - Health check: database, upload directory
///
/// Unmatched paths answer `404` problem details.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/topics",
            get(list_topics_handler).post(create_topic_handler),
        )
        .route(
            "/topics/{id}",
            get(get_topic_handler).delete(delete_topic_handler),
        )
        .route("/topics/{id}/progress", put(update_progress_handler))
        .route("/upload", post(upload_handler))
        .route("/health", get(health_handler))
        .fallback(route_not_found)
}

async fn route_not_found() -> AppError {
    AppError::not_found("Not Found")
}
