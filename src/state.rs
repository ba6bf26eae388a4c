//! Shared application state injected into handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{TopicService, UploadService};
use crate::config::Config;
use crate::domain::limits::{BodySizeGuard, SlidingWindowLimiter};
use crate::infrastructure::persistence::SqliteTopicRepository;
use crate::infrastructure::storage::SecureFileStore;

#[derive(Clone)]
pub struct AppState {
    pub topic_service: Arc<TopicService<SqliteTopicRepository>>,
    pub upload_service: Arc<UploadService>,
    pub rate_limiter: Arc<SlidingWindowLimiter>,
    pub body_guard: BodySizeGuard,
    /// When true, the rate-limit key comes from proxy headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires services and limits from a repository and configuration.
    pub fn new(repository: Arc<SqliteTopicRepository>, config: &Config) -> Self {
        let store = SecureFileStore::new(config.upload_dir.clone(), config.upload_max_bytes);
        let limiter = SlidingWindowLimiter::new(
            config.rate_limit_rpm,
            Duration::from_secs(config.rate_limit_window_seconds),
        );

        Self {
            topic_service: Arc::new(TopicService::new(repository)),
            upload_service: Arc::new(UploadService::new(store)),
            rate_limiter: Arc::new(limiter),
            body_guard: BodySizeGuard::new(config.max_body_bytes),
            behind_proxy: config.behind_proxy,
        }
    }
}
