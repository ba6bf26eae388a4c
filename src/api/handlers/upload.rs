//! Handler for image uploads.

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};

use crate::api::dto::upload::{FILE_FIELD, UploadResponse};
use crate::error::{AppError, FieldError};
use crate::state::AppState;

/// Accepts a PNG or JPEG image and stores it under a generated name.
///
/// # Endpoint
///
/// `POST /upload` as `multipart/form-data` with a `file` field.
///
/// # Response
///
/// ```json
/// { "status": "ok", "path": "3f2c...e1.png" }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: `File too large`, `Invalid file type`,
///   `Path traversal detected`, `Symlink parent forbidden`
/// - **413 Payload Too Large**: body exceeds the streaming cap
/// - **422 Unprocessable Entity**: missing `file` field or non-multipart body
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        AppError::invalid_fields(vec![FieldError {
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
            kind: "multipart".to_string(),
        }])
    })?;

    let mut data = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(FILE_FIELD) {
            data = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }

    let data = data.ok_or_else(|| {
        AppError::invalid_fields(vec![FieldError {
            loc: vec!["body".to_string(), FILE_FIELD.to_string()],
            msg: "field required".to_string(),
            kind: "missing".to_string(),
        }])
    })?;

    let stored = state.upload_service.save_image(data.to_vec()).await?;

    Ok(Json(UploadResponse::ok(stored.file_name())))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(e.body_text())
    } else {
        AppError::bad_request(e.body_text())
    }
}
