//! Loads demo data into the configured database: a handful of videos across
//! categories and one demo account. Safe to run repeatedly.

use anyhow::Context;
use auth_adapters::Argon2Hasher;
use configs::Settings;
use domains::{NewUser, NewVideo, PasswordHasher, UserRepository, VideoRepository};
use secrecy::ExposeSecret;
use storage_adapters::PgStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_EMAIL: &str = "demo@shortfeed.local";
const DEMO_PASSWORD: &str = "demo-password";

/// (url, title, description, category)
const SAMPLE_VIDEOS: &[(&str, &str, &str, &str)] = &[
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        "Campfire Nights",
        "Flames, marshmallows and a long exposure.",
        "Outdoors",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
        "Weekend Escape",
        "Two days, one backpack.",
        "Travel",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
        "Backyard Olympics",
        "Our annual family tournament.",
        "Comedy",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
        "Coastal Drive",
        "Highway 1 at golden hour.",
        "Travel",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4",
        "Ice Cream Meltdown",
        "It did not survive the heatwave.",
        "Comedy",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/SubaruOutbackOnStreetAndDirt.mp4",
        "Dirt Road Test",
        "Taking the wagon off pavement.",
        "Outdoors",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/WeAreGoingOnBullrun.mp4",
        "Bullrun Rally",
        "Start line to finish in sixty seconds.",
        "Cars",
    ),
    (
        "https://storage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
        "Tears of Steel (clip)",
        "Open movie excerpt.",
        "Film",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().context("loading configuration")?;
    let store = PgStore::connect(settings.database.url.expose_secret(), 2)
        .await
        .context("connecting to postgres")?;
    store.migrate().await.context("running migrations")?;

    seed_videos(&store).await?;
    seed_demo_user(&store).await?;
    Ok(())
}

async fn seed_videos(store: &PgStore) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
        .fetch_one(store.pool())
        .await?;
    if existing > 0 {
        info!(existing, "videos already present, skipping");
        return Ok(());
    }

    for (url, title, description, category) in SAMPLE_VIDEOS {
        let video = VideoRepository::create(
            store,
            NewVideo {
                url: (*url).to_string(),
                title: (*title).to_string(),
                description: Some((*description).to_string()),
                category: Some((*category).to_string()),
            },
        )
        .await?;
        info!(id = %video.id, title = %video.title, "inserted video");
    }
    info!(count = SAMPLE_VIDEOS.len(), "videos seeded");
    Ok(())
}

async fn seed_demo_user(store: &PgStore) -> anyhow::Result<()> {
    if store.find_by_email(DEMO_EMAIL).await?.is_some() {
        info!(email = DEMO_EMAIL, "demo user already present, skipping");
        return Ok(());
    }
    let password_hash = Argon2Hasher::new().hash(DEMO_PASSWORD)?;
    let user = UserRepository::create(
        store,
        NewUser { email: DEMO_EMAIL.to_string(), password_hash },
    )
    .await?;
    info!(id = %user.id, email = DEMO_EMAIL, "demo user created");
    Ok(())
}
