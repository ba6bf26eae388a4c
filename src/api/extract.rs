//! Extractors that report failures as problem details.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, FieldError};

/// JSON body that is deserialized and then validated.
///
/// Both malformed JSON and validation failures are rejected with
/// `422 Validation Error`, listing the offending fields.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Numeric topic id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct TopicId(pub i64);

impl<S> FromRequestParts<S> for TopicId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_fields(vec![FieldError {
                    loc: vec!["path".to_string(), "topic_id".to_string()],
                    msg: rejection.body_text(),
                    kind: "int_parsing".to_string(),
                }])
            })?;
        Ok(Self(id))
    }
}
