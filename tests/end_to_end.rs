//! Create, redirect and count through the full router and a live worker pool.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use snaplink::domain::click_worker::ClickWorkerPool;

#[tokio::test]
async fn test_create_redirect_and_count_click() {
    let ctx = common::create_test_state(32);
    let pool = ClickWorkerPool::start(ctx.queue.clone(), ctx.store.clone(), 2);
    let server = common::create_test_server(ctx.state);

    let created = server
        .post("/api/v1/links")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let code = created.json::<serde_json::Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();

    let redirect = server.get(&format!("/{code}")).await;
    redirect.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://example.com/");

    let report = pool.shutdown().await;
    assert_eq!(report.recorded, 1);
    assert_eq!(report.failed, 0);

    let stats = server
        .get(&format!("/api/v1/links/{code}/stats"))
        .await
        .json::<serde_json::Value>();
    assert_eq!(stats["short_code"], code.as_str());
    assert_eq!(stats["total_clicks"], 1);

    let clicks = ctx.store.clicks().await;
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].ip_address.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_unknown_code_is_not_found_everywhere() {
    let ctx = common::create_test_state(8);
    let server = common::create_test_server(ctx.state);

    server.get("/nonexistent").await.assert_status_not_found();
    server
        .get("/api/v1/links/nonexistent/stats")
        .await
        .assert_status_not_found();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overload_drops_clicks_but_serves_every_redirect() {
    const CAPACITY: usize = 4;
    const REQUESTS: usize = 20;

    let ctx = common::create_test_state(CAPACITY);
    let link = common::create_test_link(&ctx.store, "burst1", "https://example.com/burst").await;
    let server = common::create_test_server(ctx.state);

    for _ in 0..REQUESTS {
        server
            .get("/burst1")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }
    assert_eq!(ctx.queue.len(), CAPACITY);

    let pool = ClickWorkerPool::start(ctx.queue.clone(), ctx.store.clone(), 3);
    let report = pool.shutdown().await;

    assert_eq!(report.recorded as usize, CAPACITY);
    let clicks = ctx.store.clicks().await;
    assert_eq!(clicks.len(), CAPACITY);
    assert!(clicks.iter().all(|c| c.link_id == link.id));
}
