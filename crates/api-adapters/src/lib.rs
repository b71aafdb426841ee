//! # api-adapters
//!
//! The HTTP routing and orchestration layer for shortfeed.
//! The axum router lives behind the `web-axum` feature; the metrics
//! registry is always compiled.

pub mod metrics;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;

#[cfg(feature = "web-axum")]
pub use router::{router, AppState};

#[cfg(feature = "web-axum")]
mod router {
    use std::sync::Arc;

    use axum::routing::{get, post};
    use axum::Router;
    use services::{AccountService, EngagementService, FeedService, SuggestionService};
    use tower::ServiceBuilder;

    use crate::handlers::{auth, health, suggestions, videos};
    use crate::metrics::Metrics;
    use crate::middleware;

    /// State shared across all request tasks.
    #[derive(Clone)]
    pub struct AppState {
        pub feed: Arc<FeedService>,
        pub engagement: Arc<EngagementService>,
        pub suggestions: Arc<SuggestionService>,
        pub accounts: Arc<AccountService>,
        pub metrics: Arc<Metrics>,
    }

    /// Builds the full application router with its middleware stack.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/api/videos", get(videos::list_videos).post(videos::create_video))
            .route("/api/videos/random", get(videos::random_video))
            .route("/api/videos/{id}/view", post(videos::record_view))
            .route("/api/videos/{id}/like", post(videos::toggle_like).get(videos::like_status))
            .route("/api/video-suggestions", post(suggestions::create_suggestion))
            .route("/api/register", post(auth::register))
            .route("/api/login", post(auth::login))
            .route("/api/logout", post(auth::logout))
            .route("/api/user", get(auth::current_user))
            .route("/health", get(health::health))
            .route("/metrics", get(health::metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::set_request_id())
                    .layer(middleware::trace_layer())
                    .layer(middleware::propagate_request_id())
                    .layer(middleware::cors_policy()),
            )
    }
}
