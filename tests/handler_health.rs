mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::create_test_app().await;
    let server = TestServer::new(app.router()).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["uploads"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let app = common::create_test_app().await;
    let server = TestServer::new(app.router()).unwrap();

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("database").is_some());
    assert!(json["checks"].get("uploads").is_some());
}

#[tokio::test]
async fn test_health_degraded_without_upload_dir() {
    let app = common::create_test_app_with(|config| {
        config.upload_dir = config.upload_dir.join("missing");
    })
    .await;
    let server = TestServer::new(app.router()).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["uploads"]["status"], "error");
    assert!(
        json["checks"]["uploads"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Upload directory missing")
    );
}

#[tokio::test]
async fn test_health_degraded_when_database_closed() {
    let app = common::create_test_app().await;
    let server = TestServer::new(app.router()).unwrap();

    app.pool.close().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["checks"]["database"]["status"],
        "error"
    );
}
