//! Application error type rendered as RFC 7807 problem details.
//!
//! Every handler and middleware failure is an [`AppError`]. The error renders
//! itself as `application/problem+json`; the
//! [`crate::api::middleware::problem`] layer later fills in the request
//! specific `instance` and `correlation_id` members.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::infrastructure::storage::UploadError;

/// Media type of every error body produced by the service.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Problem `type` used for request validation failures.
pub const VALIDATION_TYPE: &str = "https://example.com/errors/validation";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// RFC 7807 problem details body.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ProblemDetails {
    /// Generic problem for an error status produced outside [`AppError`],
    /// such as an unmatched route or method.
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            type_uri: "about:blank".to_string(),
            title: "HTTP Error".to_string(),
            status: status.as_u16(),
            detail: json!(status.canonical_reason().unwrap_or("Error")),
            instance: None,
            correlation_id: None,
            errors: None,
        }
    }

    /// Serializes the problem into a response with the problem media type.
    pub fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_JSON),
        );
        response.extensions_mut().insert(self);
        response
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    PayloadTooLarge { message: String },

    #[error("{message}")]
    Validation {
        message: String,
        errors: Option<Vec<FieldError>>,
    },

    #[error("{message}")]
    TooManyRequests { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: None,
        }
    }

    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: "Request validation failed".to_string(),
            errors: Some(errors),
        }
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::TooManyRequests {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the problem details body without request-specific members.
    pub fn to_problem(&self) -> ProblemDetails {
        let status = self.status().as_u16();
        let (type_uri, title, detail, errors) = match self {
            AppError::Validation { message, errors } => {
                let detail = match errors {
                    Some(list) => json!(list),
                    None => json!(message),
                };
                (VALIDATION_TYPE, "Validation Error", detail, errors.clone())
            }
            AppError::PayloadTooLarge { message } => {
                ("about:blank", "Payload Too Large", json!(message), None)
            }
            AppError::TooManyRequests { message } => {
                ("about:blank", "Too Many Requests", json!(message), None)
            }
            AppError::Internal { .. } => (
                "about:blank",
                "Internal Server Error",
                json!("Internal server error"),
                None,
            ),
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message } => ("about:blank", "HTTP Error", json!(message), None),
        };

        ProblemDetails {
            type_uri: type_uri.to_string(),
            title: title.to_string(),
            status,
            detail,
            instance: None,
            correlation_id: None,
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message } = &self {
            tracing::error!(error = %message, "Unhandled error");
        }
        self.to_problem().into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps database errors, surfacing unique violations as conflicts.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict("Topic duplicate");
    }

    AppError::internal(format!("Database error: {e}"))
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Io(io) => AppError::internal(format!("Upload write failed: {io}")),
            rejection => AppError::bad_request(rejection.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::internal(format!("Background task failed: {e}"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_error",
        };

        AppError::invalid_fields(vec![FieldError {
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
            kind: kind.to_string(),
        }])
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(&errors, &mut vec!["body".to_string()], &mut fields);
        AppError::invalid_fields(fields)
    }
}

fn collect_field_errors(errors: &ValidationErrors, loc: &mut Vec<String>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        loc.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let msg = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}"));
                    out.push(FieldError {
                        loc: loc.clone(),
                        msg,
                        kind: error.code.to_string(),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, loc, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    loc.push(index.to_string());
                    collect_field_errors(nested, loc, out);
                    loc.pop();
                }
            }
        }
        loc.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_problem() {
        let problem = AppError::not_found("Topic not found").to_problem();

        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "HTTP Error");
        assert_eq!(problem.type_uri, "about:blank");
        assert_eq!(problem.detail, json!("Topic not found"));
        assert!(problem.errors.is_none());
    }

    #[test]
    fn test_validation_problem_with_fields() {
        let err = AppError::invalid_fields(vec![FieldError {
            loc: vec!["body".into(), "title".into()],
            msg: "field required".into(),
            kind: "required".into(),
        }]);
        let problem = err.to_problem();

        assert_eq!(problem.status, 422);
        assert_eq!(problem.title, "Validation Error");
        assert_eq!(problem.type_uri, VALIDATION_TYPE);
        assert!(problem.detail.is_array());
        assert_eq!(problem.errors.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_internal_problem_hides_message() {
        let problem = AppError::internal("connection refused on 10.0.0.1").to_problem();

        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail, json!("Internal server error"));
    }

    #[test]
    fn test_upload_rejection_maps_to_bad_request() {
        let err: AppError = UploadError::InvalidFileType.into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid file type");
    }

    #[test]
    fn test_problem_from_status() {
        let problem = ProblemDetails::from_status(StatusCode::METHOD_NOT_ALLOWED);

        assert_eq!(problem.status, 405);
        assert_eq!(problem.title, "HTTP Error");
        assert_eq!(problem.detail, json!("Method Not Allowed"));
    }

    #[test]
    fn test_response_has_problem_content_type() {
        let response = AppError::too_many_requests("Rate limit 1/60s exceeded").into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_JSON
        );
        assert!(response.extensions().get::<ProblemDetails>().is_some());
    }
}
