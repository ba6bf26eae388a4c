//! DTOs for the upload endpoint.

use serde::Serialize;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Successful upload acknowledgement.
///
/// `path` is the generated file name, relative to the upload directory.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub path: String,
}

impl UploadResponse {
    pub fn ok(path: impl Into<String>) -> Self {
        Self {
            status: "ok",
            path: path.into(),
        }
    }
}
