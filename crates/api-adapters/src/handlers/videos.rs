//! Feed and engagement endpoints under `/api/videos`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use domains::{FeedQuery, NewVideo, Video, VideoId};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Response header carrying the cursor for the next page.
pub const NEXT_CURSOR_HEADER: &str = "x-next-cursor";

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Query string of `GET /api/videos`. Everything arrives as text so bad
/// values can be handled the way the feed expects instead of rejected
/// wholesale.
#[derive(Debug, Default, Deserialize)]
pub struct ListVideosParams {
    pub cursor: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub seed: Option<String>,
}

impl ListVideosParams {
    /// Bad cursors are a client error; an unreadable limit or seed just
    /// falls back to the default.
    pub fn into_query(self) -> Result<FeedQuery, ApiError> {
        let cursor = match self.cursor.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(VideoId(
                raw.parse::<i32>()
                    .map_err(|_| ApiError::validation("cursor must be an integer video id"))?,
            )),
        };
        Ok(FeedQuery {
            cursor,
            category: self.category,
            limit: self.limit.and_then(|l| l.trim().parse().ok()),
            seed: self.seed.and_then(|s| s.trim().parse().ok()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeStatusParams {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub success: bool,
    pub likes: i32,
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub liked: bool,
}

/// POST /api/videos
pub async fn create_video(
    State(state): State<AppState>,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<Json<Video>, ApiError> {
    let Json(body) = payload?;
    let video = state
        .feed
        .create_video(NewVideo {
            url: body.url.unwrap_or_default(),
            title: body.title.unwrap_or_default(),
            description: body.description,
            category: body.category,
        })
        .await?;
    Ok(Json(video))
}

/// GET /api/videos?cursor=&category=&limit=&seed=
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<ListVideosParams>,
) -> Result<(HeaderMap, Json<Vec<Video>>), ApiError> {
    let page = state
        .feed
        .list_videos(params.into_query()?)
        .await
        .map_err(|e| ApiError::from(e).or_internal("Failed to fetch videos"))?;
    state.metrics.feed_pages.inc();

    let mut headers = HeaderMap::new();
    if let Some(cursor) = page.next_cursor {
        headers.insert(NEXT_CURSOR_HEADER, HeaderValue::from(cursor.0));
    }
    Ok((headers, Json(page.videos)))
}

/// GET /api/videos/random
pub async fn random_video(State(state): State<AppState>) -> Result<Json<Video>, ApiError> {
    Ok(Json(state.feed.random_video().await?))
}

/// POST /api/videos/{id}/view
pub async fn record_view(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(id) = path?;
    if state.engagement.record_view(VideoId(id)).await? {
        state.metrics.views.inc();
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/videos/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Json<LikeResponse>, ApiError> {
    let Path(id) = path?;
    let Json(body) = payload?;
    let toggle = state
        .engagement
        .toggle_like(VideoId(id), body.session_id.as_deref())
        .await
        .map_err(|e| ApiError::from(e).or_internal("Failed to update like status"))?;
    state.metrics.record_toggle(toggle.liked);
    Ok(Json(LikeResponse { success: true, likes: toggle.likes, liked: toggle.liked }))
}

/// GET /api/videos/{id}/like?sessionId=
pub async fn like_status(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    Query(params): Query<LikeStatusParams>,
) -> Result<Json<LikeStatusResponse>, ApiError> {
    let Path(id) = path?;
    let liked = state
        .engagement
        .is_liked(VideoId(id), params.session_id.as_deref())
        .await?;
    Ok(Json(LikeStatusResponse { liked }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(cursor: Option<&str>, limit: Option<&str>) -> ListVideosParams {
        ListVideosParams {
            cursor: cursor.map(str::to_string),
            limit: limit.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn empty_cursor_is_no_cursor() {
        let query = params(Some(""), None).into_query().unwrap();
        assert_eq!(query.cursor, None);
    }

    #[test]
    fn numeric_cursor_parses() {
        let query = params(Some("12"), Some("3")).into_query().unwrap();
        assert_eq!(query.cursor, Some(VideoId(12)));
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn non_numeric_cursor_is_rejected() {
        assert!(params(Some("abc"), None).into_query().is_err());
    }

    #[test]
    fn unreadable_limit_falls_back_to_default() {
        let query = params(None, Some("lots")).into_query().unwrap();
        assert_eq!(query.limit, None);
    }
}
