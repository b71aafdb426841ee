//! # Domain Models
//!
//! These structs represent the core entities of the feed.
//! Ids are integer surrogate keys handed out by the store in increasing order,
//! which is what lets a video id double as a pagination cursor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Longest session token we are willing to store in the like ledger.
pub const MAX_SESSION_ID_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub i32);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token a client generates once per visit and sends with every like.
///
/// It identifies an anonymous visitor, not an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Trims the raw token and rejects empty or oversized values.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("Session ID is required".into()));
        }
        if trimmed.chars().count() > MAX_SESSION_ID_LEN {
            return Err(DomainError::ValidationError(format!(
                "Session ID must be at most {MAX_SESSION_ID_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A playable short video with its engagement counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub views: i32,
    /// Always equal to the number of ledger entries for this video.
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a video; counters always start at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// One row of the like ledger: "this session currently likes this video".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEntry {
    pub id: i32,
    pub video_id: VideoId,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a like toggle, read inside the same atomic step that flipped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub video_id: VideoId,
    /// State after the toggle: `true` means the session now likes the video.
    pub liked: bool,
    pub likes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for SuggestionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SuggestionStatus::Pending),
            "approved" => Ok(SuggestionStatus::Approved),
            "rejected" => Ok(SuggestionStatus::Rejected),
            other => Err(DomainError::Internal(format!("unknown suggestion status '{other}'"))),
        }
    }
}

/// A user-submitted video waiting for moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub status: SuggestionStatus,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSuggestion {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Option<UserId>,
}

/// A registered account. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Parameters of one feed request after boundary parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedQuery {
    /// Last id the client has seen; only strictly greater ids are returned.
    pub cursor: Option<VideoId>,
    pub category: Option<String>,
    pub limit: Option<u32>,
    /// Client-chosen seed that makes the in-page shuffle reproducible.
    pub seed: Option<u64>,
}

/// One page of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    /// Shuffled page contents.
    pub videos: Vec<Video>,
    /// Highest id in the page; `None` once the feed is exhausted.
    pub next_cursor: Option<VideoId>,
}
