//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binary.
//! Repositories are async and object-safe so services can hold them as
//! `Arc<dyn Trait>`; the credential ports are plain sync traits.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    LikeToggle, NewSuggestion, NewUser, NewVideo, SessionId, Suggestion, User, UserId, Video,
    VideoId,
};

/// Keyset window over the video table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Exclusive lower bound on ids.
    pub after: Option<VideoId>,
    /// Exact category match; rows with no category never match.
    pub category: Option<String>,
    pub limit: u32,
}

/// Persistence contract for the video catalogue.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create(&self, video: NewVideo) -> Result<Video>;
    async fn find_by_id(&self, id: VideoId) -> Result<Option<Video>>;
    /// Uniformly random video, `None` when the catalogue is empty.
    async fn random(&self) -> Result<Option<Video>>;
    /// Eligible videos in ascending id order, at most `window.limit` of them.
    async fn list_window(&self, window: PageWindow) -> Result<Vec<Video>>;
}

/// Counter and like-ledger mutations.
///
/// Implementations must make `toggle_like` atomic: the ledger row and the
/// `likes` counter change together or not at all.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Bumps `views` by one. Returns `false` when no such video exists.
    async fn record_view(&self, id: VideoId) -> Result<bool>;
    /// Flips the like state of `(id, session)`. Fails with `NotFound` for unknown videos.
    async fn toggle_like(&self, id: VideoId, session: &SessionId) -> Result<LikeToggle>;
    async fn is_liked(&self, id: VideoId, session: &SessionId) -> Result<bool>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    async fn create(&self, suggestion: NewSuggestion) -> Result<Suggestion>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
}

/// One-way password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    /// Verifies a plaintext password against a stored hash string.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Issues and checks bearer tokens.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: UserId) -> Result<String>;
    fn verify(&self, token: &str) -> Result<UserId>;
}
