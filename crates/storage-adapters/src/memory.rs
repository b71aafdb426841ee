//! # In-memory store
//!
//! Implements every repository port over plain collections behind a single
//! `RwLock`. Used by tests and by the binary when built without
//! `db-postgres`. A like toggle holds the write lock for the whole
//! lookup/insert-or-delete/counter step, which gives it the same atomicity
//! the Postgres adapter gets from its transaction.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use domains::{
    DomainError, EngagementRepository, LikeEntry, LikeToggle, NewSuggestion, NewUser, NewVideo,
    PageWindow, Result, SessionId, Suggestion, SuggestionRepository, SuggestionStatus, User,
    UserId, UserRepository, Video, VideoId, VideoRepository,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    videos: BTreeMap<VideoId, Video>,
    likes: HashMap<(VideoId, SessionId), LikeEntry>,
    suggestions: Vec<Suggestion>,
    users: BTreeMap<i32, User>,
    next_video_id: i32,
    next_like_id: i32,
    next_suggestion_id: i32,
    next_user_id: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger rows for a video. Lets tests check the
    /// `likes == ledger rows` invariant directly.
    pub async fn ledger_len(&self, id: VideoId) -> usize {
        let state = self.state.read().await;
        state.likes.keys().filter(|(video, _)| *video == id).count()
    }
}

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        let mut state = self.state.write().await;
        let id = VideoId(next(&mut state.next_video_id));
        let video = Video {
            id,
            url: video.url,
            title: video.title,
            description: video.description,
            category: video.category,
            views: 0,
            likes: 0,
            created_at: Utc::now(),
        };
        state.videos.insert(id, video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, id: VideoId) -> Result<Option<Video>> {
        Ok(self.state.read().await.videos.get(&id).cloned())
    }

    async fn random(&self) -> Result<Option<Video>> {
        let state = self.state.read().await;
        if state.videos.is_empty() {
            return Ok(None);
        }
        let pick = (rand::random::<u64>() % state.videos.len() as u64) as usize;
        Ok(state.videos.values().nth(pick).cloned())
    }

    async fn list_window(&self, window: PageWindow) -> Result<Vec<Video>> {
        let state = self.state.read().await;
        let lower = window
            .after
            .map_or(std::ops::Bound::Unbounded, std::ops::Bound::Excluded);
        Ok(state
            .videos
            .range((lower, std::ops::Bound::Unbounded))
            .map(|(_, v)| v)
            .filter(|v| match &window.category {
                Some(wanted) => v.category.as_deref() == Some(wanted.as_str()),
                None => true,
            })
            .take(window.limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EngagementRepository for MemoryStore {
    async fn record_view(&self, id: VideoId) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.videos.get_mut(&id) {
            Some(video) => {
                video.views = video.views.checked_add(1).ok_or_else(|| {
                    DomainError::Internal(format!("view counter overflow on video {id}"))
                })?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn toggle_like(&self, id: VideoId, session: &SessionId) -> Result<LikeToggle> {
        let mut state = self.state.write().await;
        if !state.videos.contains_key(&id) {
            return Err(DomainError::not_found("Video", id));
        }

        let key = (id, session.clone());
        let liked = if state.likes.remove(&key).is_some() {
            false
        } else {
            let entry = LikeEntry {
                id: next(&mut state.next_like_id),
                video_id: id,
                session_id: session.clone(),
                created_at: Utc::now(),
            };
            state.likes.insert(key, entry);
            true
        };

        let video = state
            .videos
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Video", id))?;
        video.likes = if liked { video.likes + 1 } else { (video.likes - 1).max(0) };

        Ok(LikeToggle { video_id: id, liked, likes: video.likes })
    }

    async fn is_liked(&self, id: VideoId, session: &SessionId) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.likes.contains_key(&(id, session.clone())))
    }
}

#[async_trait]
impl SuggestionRepository for MemoryStore {
    async fn create(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
        let mut state = self.state.write().await;
        if let Some(user) = suggestion.user_id {
            if !state.users.contains_key(&user.0) {
                return Err(DomainError::ValidationError("referenced record does not exist".into()));
            }
        }
        let created = Suggestion {
            id: next(&mut state.next_suggestion_id),
            url: suggestion.url,
            title: suggestion.title,
            description: suggestion.description,
            status: SuggestionStatus::Pending,
            user_id: suggestion.user_id,
            created_at: Utc::now(),
        };
        state.suggestions.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict("Email already registered".into()));
        }
        let id = next(&mut state.next_user_id);
        let created = User {
            id: UserId(id),
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id.0).cloned())
    }
}
