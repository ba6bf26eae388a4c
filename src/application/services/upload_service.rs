//! Image upload service.

use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::storage::{SecureFileStore, StoredFile, UploadError};

/// Runs [`SecureFileStore`] writes on the blocking thread pool.
pub struct UploadService {
    store: Arc<SecureFileStore>,
}

impl UploadService {
    pub fn new(store: SecureFileStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &SecureFileStore {
        &self.store
    }

    /// Validates and persists an uploaded image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] naming the rejection reason for
    /// invalid payloads, [`AppError::Internal`] if the write fails.
    pub async fn save_image(&self, data: Vec<u8>) -> Result<StoredFile, AppError> {
        let store = Arc::clone(&self.store);
        let size = data.len();

        let result = tokio::task::spawn_blocking(move || store.save(&data)).await?;

        match result {
            Ok(stored) => {
                metrics::counter!("uploads_accepted_total").increment(1);
                tracing::info!(
                    file = %stored.file_name(),
                    mime = stored.image_type.mime(),
                    size,
                    "Upload stored"
                );
                Ok(stored)
            }
            Err(UploadError::Io(e)) => {
                tracing::error!(error = %e, "Upload write failed");
                Err(UploadError::Io(e).into())
            }
            Err(rejection) => {
                metrics::counter!("uploads_rejected_total").increment(1);
                tracing::warn!(reason = %rejection, size, "Upload rejected");
                Err(rejection.into())
            }
        }
    }

    /// Returns true if the upload root exists.
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }
}
