mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

const ALLOWED: &str = "https://app.example.com";

async fn app() -> common::TestApp {
    common::create_test_app_with(|config| {
        config.cors_allowed_origins = vec![ALLOWED.to_string()];
    })
    .await
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/topics")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_preflight_allowed_origin() {
    let app = app().await;

    let response = app.router().oneshot(preflight(ALLOWED)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED
    );
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
    );
}

#[tokio::test]
async fn test_preflight_unlisted_origin() {
    let app = app().await;

    let response = app
        .router()
        .oneshot(preflight("https://evil.example.net"))
        .await
        .unwrap();

    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn test_simple_request_gets_allow_origin() {
    let app = app().await;

    let request = Request::builder()
        .uri("/topics")
        .header(header::ORIGIN, ALLOWED)
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED
    );
}
