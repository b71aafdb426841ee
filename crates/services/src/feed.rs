//! # Feed Service
//!
//! Serves the scrolling feed. A page is the `limit` lowest ids above the
//! client's cursor (optionally restricted to one category), shuffled in
//! place. Because the window itself is keyset-ordered, following
//! `next_cursor` walks the whole catalogue once with no repeats; only the
//! order inside each page is random.

use std::sync::Arc;

use domains::{
    DomainError, FeedPage, FeedQuery, NewVideo, PageWindow, Result, Video, VideoRepository,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

use crate::validation;

/// Page size limits applied to every feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self { default_limit: 5, max_limit: 50 }
    }
}

pub struct FeedService {
    videos: Arc<dyn VideoRepository>,
    limits: FeedLimits,
}

impl FeedService {
    pub fn new(videos: Arc<dyn VideoRepository>, limits: FeedLimits) -> Self {
        Self { videos, limits }
    }

    /// Returns one page of the feed.
    #[tracing::instrument(skip(self), fields(cursor = ?query.cursor, category = ?query.category))]
    pub async fn list_videos(&self, query: FeedQuery) -> Result<FeedPage> {
        let window = PageWindow {
            after: query.cursor,
            category: validation::optional_text(query.category),
            limit: self.effective_limit(query.limit),
        };

        let mut videos = self.videos.list_window(window).await?;
        let next_cursor = videos.iter().map(|v| v.id).max();

        let seed = match query.seed {
            Some(seed) => page_seed(seed, query.cursor.map(|c| c.0)),
            None => rand::random(),
        };
        shuffle_page(&mut videos, seed);

        debug!(count = videos.len(), next_cursor = ?next_cursor, "feed page assembled");
        Ok(FeedPage { videos, next_cursor })
    }

    /// Picks any one video at random.
    pub async fn random_video(&self) -> Result<Video> {
        self.videos
            .random()
            .await?
            .ok_or_else(|| DomainError::not_found("Video", "random"))
    }

    /// Direct submission: validated and stored with zeroed counters.
    #[tracing::instrument(skip(self, video), fields(url = %video.url))]
    pub async fn create_video(&self, video: NewVideo) -> Result<Video> {
        let video = NewVideo {
            url: validation::video_url(&video.url)?,
            title: validation::title(&video.title)?,
            description: Some(validation::optional_text(video.description).unwrap_or_default()),
            category: validation::optional_text(video.category),
        };
        let created = self.videos.create(video).await?;
        info!(video_id = %created.id, "video created");
        Ok(created)
    }

    fn effective_limit(&self, requested: Option<u32>) -> u32 {
        match requested {
            None | Some(0) => self.limits.default_limit,
            Some(n) => n.min(self.limits.max_limit),
        }
    }
}

/// Derives the shuffle seed for one page, so a client that replays the
/// same seed and cursor sees the same order.
fn page_seed(seed: u64, cursor: Option<i32>) -> u64 {
    let cursor = cursor.unwrap_or(0) as u64;
    seed ^ cursor.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn shuffle_page(videos: &mut [Video], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    videos.shuffle(&mut rng);
}
