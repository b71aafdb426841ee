//! # shortfeed
//!
//! The entry point that assembles the application: settings, logging,
//! storage, services and the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::metrics::Metrics;
use api_adapters::AppState;
use auth_adapters::{Argon2Hasher, JwtIssuer};
use configs::{LogSettings, Settings};
use domains::{EngagementRepository, SuggestionRepository, UserRepository, VideoRepository};
use secrecy::ExposeSecret;
use services::{AccountService, EngagementService, FeedLimits, FeedService, SuggestionService};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.log);
    info!(environment = %settings.environment, "starting shortfeed");

    let state = build_state(&settings).await?;
    let app = api_adapters::router(state);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down cleanly");
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Every port handle the services need, all pointing at one store.
struct Stores {
    videos: Arc<dyn VideoRepository>,
    engagement: Arc<dyn EngagementRepository>,
    suggestions: Arc<dyn SuggestionRepository>,
    users: Arc<dyn UserRepository>,
}

#[cfg(feature = "db-postgres")]
async fn open_stores(settings: &Settings) -> anyhow::Result<Stores> {
    let store = storage_adapters::PgStore::connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    if settings.database.run_migrations {
        store.migrate().await.context("running migrations")?;
    }
    let store = Arc::new(store);
    Ok(Stores {
        videos: store.clone(),
        engagement: store.clone(),
        suggestions: store.clone(),
        users: store,
    })
}

#[cfg(not(feature = "db-postgres"))]
async fn open_stores(_settings: &Settings) -> anyhow::Result<Stores> {
    warn!("built without db-postgres: using the in-memory store, data is lost on exit");
    let store = Arc::new(storage_adapters::MemoryStore::new());
    Ok(Stores {
        videos: store.clone(),
        engagement: store.clone(),
        suggestions: store.clone(),
        users: store,
    })
}

async fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let stores = open_stores(settings).await?;

    if settings.auth.jwt_secret.expose_secret() == configs::DEV_JWT_SECRET {
        warn!("using the development JWT secret");
    }
    let tokens = JwtIssuer::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
        chrono::Duration::hours(settings.auth.token_ttl_hours),
    );

    let limits = FeedLimits {
        default_limit: settings.feed.default_limit,
        max_limit: settings.feed.max_limit,
    };

    Ok(AppState {
        feed: Arc::new(FeedService::new(stores.videos, limits)),
        engagement: Arc::new(EngagementService::new(stores.engagement)),
        suggestions: Arc::new(SuggestionService::new(stores.suggestions)),
        accounts: Arc::new(AccountService::new(
            stores.users,
            Arc::new(Argon2Hasher::new()),
            Arc::new(tokens),
        )),
        metrics: Arc::new(Metrics::new()),
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
