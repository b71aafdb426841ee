//! Shared fixtures for the cross-crate tests: a fully wired application over
//! the in-memory store, plus helpers to seed it and drive the router.

use std::sync::Arc;

use api_adapters::metrics::Metrics;
use api_adapters::{router, AppState};
use auth_adapters::{Argon2Hasher, JwtIssuer};
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use domains::{NewVideo, Video, VideoRepository};
use serde_json::Value;
use services::{AccountService, EngagementService, FeedLimits, FeedService, SuggestionService};
use storage_adapters::MemoryStore;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &[u8] = b"integration-tests-secret-0123456789";

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            feed: Arc::new(FeedService::new(store.clone(), FeedLimits::default())),
            engagement: Arc::new(EngagementService::new(store.clone())),
            suggestions: Arc::new(SuggestionService::new(store.clone())),
            accounts: Arc::new(AccountService::new(
                store.clone(),
                Arc::new(Argon2Hasher::new()),
                Arc::new(JwtIssuer::new(TEST_JWT_SECRET, chrono::Duration::hours(1))),
            )),
            metrics: Arc::new(Metrics::new()),
        };
        Self { store, state }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub async fn seed_video(&self, n: usize, category: Option<&str>) -> Video {
        VideoRepository::create(
            self.store.as_ref(),
            NewVideo {
                url: format!("https://cdn.example.com/{n}.mp4"),
                title: format!("clip {n}"),
                description: None,
                category: category.map(str::to_string),
            },
        )
        .await
        .expect("seed video")
    }

    pub async fn seed_videos(&self, count: usize) -> Vec<Video> {
        let mut out = Vec::with_capacity(count);
        for n in 0..count {
            out.push(self.seed_video(n, None).await);
        }
        out
    }
}

/// A decoded response: status, headers, and the body parsed as JSON
/// (`Value::Null` when the body is not JSON).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse { status, headers, body }
}

pub async fn send_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
