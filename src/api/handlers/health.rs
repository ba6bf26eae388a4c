//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 3 topics" },
///     "uploads": { "status": "ok", "message": "Upload directory ready" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let uploads_check = check_uploads(&state);

    let all_healthy = db_check.is_ok() && uploads_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            uploads: uploads_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.topic_service.count_topics().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} topics")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

fn check_uploads(state: &AppState) -> CheckStatus {
    if state.upload_service.is_ready() {
        CheckStatus::ok("Upload directory ready")
    } else {
        CheckStatus::error(format!(
            "Upload directory missing: {}",
            state.upload_service.store().root().display()
        ))
    }
}
