mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use snaplink::routes::app_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_state(16);
    let server = common::create_test_server(ctx.state);

    let response = server.get("/api/v1/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_queue_closed() {
    let ctx = common::create_test_state(16);
    ctx.queue.close();
    let server = common::create_test_server(ctx.state);

    let response = server.get("/api/v1/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let ctx = common::create_test_state(16);
    let app = app_router(ctx.state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
