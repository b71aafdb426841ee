//! The feed and engagement endpoints end to end.

use std::collections::HashSet;

use axum::http::StatusCode;
use integration_tests::{send, send_text, Harness};
use serde_json::json;

#[tokio::test]
async fn feed_pages_chain_through_next_cursor_header() {
    let h = Harness::new();
    h.seed_videos(12).await;
    let app = h.router();

    let mut seen = HashSet::new();
    let mut uri = "/api/videos?limit=5".to_string();
    loop {
        let res = send(&app, "GET", &uri, None, None).await;
        assert_eq!(res.status, StatusCode::OK);
        let page = res.body.as_array().expect("array body").clone();
        if page.is_empty() {
            assert!(res.headers.get("x-next-cursor").is_none());
            break;
        }
        for video in &page {
            assert!(seen.insert(video["id"].as_i64().unwrap()), "video repeated");
        }
        let cursor = res.headers["x-next-cursor"].to_str().unwrap().to_string();
        uri = format!("/api/videos?limit=5&cursor={cursor}");
    }
    assert_eq!(seen.len(), 12);
}

#[tokio::test]
async fn default_limit_is_five() {
    let h = Harness::new();
    h.seed_videos(9).await;
    let res = send(&h.router(), "GET", "/api/videos", None, None).await;
    assert_eq!(res.body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn category_query_filters_results() {
    let h = Harness::new();
    h.seed_video(0, Some("food")).await;
    h.seed_video(1, None).await;
    h.seed_video(2, Some("travel")).await;
    h.seed_video(3, Some("food")).await;

    let res = send(&h.router(), "GET", "/api/videos?category=food&limit=10", None, None).await;
    let page = res.body.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|v| v["category"] == "food"));
}

#[tokio::test]
async fn like_toggle_scenario_over_http() {
    let h = Harness::new();
    let video = h.seed_video(0, None).await;
    let app = h.router();
    let uri = format!("/api/videos/{}/like", video.id);

    let likes = |body: &serde_json::Value| body["likes"].as_i64().unwrap();
    let r1 = send(&app, "POST", &uri, Some(json!({ "sessionId": "s1" })), None).await;
    let r2 = send(&app, "POST", &uri, Some(json!({ "sessionId": "s1" })), None).await;
    let r3 = send(&app, "POST", &uri, Some(json!({ "sessionId": "s2" })), None).await;
    assert_eq!((likes(&r1.body), likes(&r2.body), likes(&r3.body)), (1, 0, 1));
    assert_eq!(r2.body["liked"], false);
}

#[tokio::test]
async fn views_show_up_in_the_next_feed_page() {
    let h = Harness::new();
    let video = h.seed_video(0, None).await;
    let app = h.router();

    let view_uri = format!("/api/videos/{}/view", video.id);
    send(&app, "POST", &view_uri, None, None).await;
    send(&app, "POST", &view_uri, None, None).await;

    let res = send(&app, "GET", "/api/videos", None, None).await;
    assert_eq!(res.body[0]["views"], 2);
}

#[tokio::test]
async fn random_returns_a_single_video() {
    let h = Harness::new();
    h.seed_videos(2).await;
    let res = send(&h.router(), "GET", "/api/videos/random", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["id"].is_i64());
    assert!(res.body["url"].is_string());
}

#[tokio::test]
async fn metrics_count_engagement() {
    let h = Harness::new();
    let video = h.seed_video(0, None).await;
    let app = h.router();

    send(&app, "GET", "/api/videos", None, None).await;
    send(&app, "POST", &format!("/api/videos/{}/view", video.id), None, None).await;
    send(
        &app,
        "POST",
        &format!("/api/videos/{}/like", video.id),
        Some(json!({ "sessionId": "m" })),
        None,
    )
    .await;

    let (status, text) = send_text(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("shortfeed_feed_pages_total 1"));
    assert!(text.contains("shortfeed_views_total 1"));
    assert!(text.contains("shortfeed_like_toggles_total{action=\"Like\"} 1"));
}

#[tokio::test]
async fn views_on_unknown_videos_are_not_counted() {
    let h = Harness::new();
    let video = h.seed_video(0, None).await;
    let app = h.router();

    let missing = send(&app, "POST", "/api/videos/999/view", None, None).await;
    assert_eq!(missing.status, StatusCode::OK);
    send(&app, "POST", &format!("/api/videos/{}/view", video.id), None, None).await;

    let (_, text) = send_text(&app, "/metrics").await;
    assert!(text.contains("shortfeed_views_total 1"), "{text}");
}
