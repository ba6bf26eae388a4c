#![allow(dead_code)]

use axum::Router;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use study_plan::config::Config;
use study_plan::infrastructure::persistence::{SqliteTopicRepository, migrate};
use study_plan::routes;
use study_plan::state::AppState;
use tempfile::TempDir;

/// Smallest payload carrying a PNG signature.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

/// JPEG start and end markers around a little filler.
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\xff\xd9";

pub struct TestApp {
    pub state: AppState,
    pub pool: SqlitePool,
    pub config: Config,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Router with the full middleware stack, without path normalization.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone(), &self.config.cors_allowed_origins)
    }
}

/// In-memory database with migrations applied.
///
/// A single connection that never expires keeps the database alive for
/// the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    migrate(&pool).await.unwrap();
    pool
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

/// Builds state from the default config after `configure` adjusts it.
///
/// Rate limiting is off and uploads go to a fresh temp dir unless
/// `configure` says otherwise.
pub async fn create_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();

    let mut config = Config {
        upload_dir: upload_dir.path().to_path_buf(),
        rate_limit_rpm: 0,
        ..Config::default()
    };
    configure(&mut config);

    let pool = test_pool().await;
    let repository = Arc::new(SqliteTopicRepository::new(Arc::new(pool.clone())));
    let state = AppState::new(repository, &config);

    TestApp {
        state,
        pool,
        config,
        upload_dir,
    }
}
