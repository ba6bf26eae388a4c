//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `Deserialize` and `Validate`; they are extracted
//! through [`crate::api::extract::ValidatedJson`] so that both malformed
//! JSON and failed validation render as `422` problem details.

pub mod health;
pub mod topic;
pub mod upload;

use serde::Serialize;

/// Minimal acknowledgement body, e.g. `{"status": "ok"}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}
