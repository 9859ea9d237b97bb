mod common;

use chrono::Utc;
use snaplink::domain::entities::NewClick;
use snaplink::domain::repositories::ClickRepository;

#[tokio::test]
async fn test_stats_success() {
    let ctx = common::create_test_state(16);
    let link = common::create_test_link(&ctx.store, "stats1", "https://example.com").await;

    for _ in 0..3 {
        ctx.store
            .record_click(NewClick {
                link_id: link.id,
                user_agent: None,
                ip_address: Some("192.168.1.1".to_string()),
                clicked_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let server = common::create_test_server(ctx.state);

    let response = server.get("/api/v1/links/stats1/stats").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "stats1");
    assert_eq!(json["long_url"], "https://example.com");
    assert_eq!(json["total_clicks"], 3);
}

#[tokio::test]
async fn test_stats_no_clicks() {
    let ctx = common::create_test_state(16);
    common::create_test_link(&ctx.store, "quiet1", "https://example.com").await;
    let server = common::create_test_server(ctx.state);

    let json = server
        .get("/api/v1/links/quiet1/stats")
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["total_clicks"], 0);
}

#[tokio::test]
async fn test_stats_not_found() {
    let ctx = common::create_test_state(16);
    let server = common::create_test_server(ctx.state);

    let response = server.get("/api/v1/links/nonexistent/stats").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}
