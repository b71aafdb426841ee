//! # Engagement Service
//!
//! View counting and session-keyed like toggles.

use std::sync::Arc;

use domains::{EngagementRepository, LikeToggle, Result, SessionId, VideoId};
use tracing::{debug, info};

pub struct EngagementService {
    repo: Arc<dyn EngagementRepository>,
}

impl EngagementService {
    pub fn new(repo: Arc<dyn EngagementRepository>) -> Self {
        Self { repo }
    }

    /// Counts one view and reports whether it landed. Unknown ids are a
    /// silent no-op.
    pub async fn record_view(&self, id: VideoId) -> Result<bool> {
        let recorded = self.repo.record_view(id).await?;
        if !recorded {
            debug!(video_id = %id, "view for unknown video ignored");
        }
        Ok(recorded)
    }

    /// Flips the like state of `id` for the given session.
    ///
    /// `session` is the raw token from the request body; missing or blank
    /// tokens fail validation before the store is touched.
    #[tracing::instrument(skip(self, session), fields(video_id = %id))]
    pub async fn toggle_like(&self, id: VideoId, session: Option<&str>) -> Result<LikeToggle> {
        let session = SessionId::parse(session.unwrap_or_default())?;
        let toggle = self.repo.toggle_like(id, &session).await?;
        info!(liked = toggle.liked, likes = toggle.likes, "like toggled");
        Ok(toggle)
    }

    pub async fn is_liked(&self, id: VideoId, session: Option<&str>) -> Result<bool> {
        let session = SessionId::parse(session.unwrap_or_default())?;
        self.repo.is_liked(id, &session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockEngagementRepository};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn view_on_unknown_video_is_ok() {
        let mut repo = MockEngagementRepository::new();
        repo.expect_record_view()
            .with(eq(VideoId(404)))
            .times(1)
            .returning(|_| Ok(false));

        let recorded = EngagementService::new(Arc::new(repo))
            .record_view(VideoId(404))
            .await
            .unwrap();
        assert!(!recorded);
    }

    #[tokio::test]
    async fn missing_session_never_reaches_the_store() {
        let repo = MockEngagementRepository::new();
        let service = EngagementService::new(Arc::new(repo));

        for session in [None, Some(""), Some("   ")] {
            let err = service.toggle_like(VideoId(1), session).await.unwrap_err();
            assert_eq!(err, DomainError::ValidationError("Session ID is required".into()));
        }
    }

    #[tokio::test]
    async fn toggle_passes_trimmed_session() {
        let mut repo = MockEngagementRepository::new();
        repo.expect_toggle_like()
            .withf(|id, session| *id == VideoId(3) && session.as_str() == "s1")
            .times(1)
            .returning(|id, _| Ok(LikeToggle { video_id: id, liked: true, likes: 1 }));

        let toggle = EngagementService::new(Arc::new(repo))
            .toggle_like(VideoId(3), Some(" s1 "))
            .await
            .unwrap();
        assert!(toggle.liked);
        assert_eq!(toggle.likes, 1);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut repo = MockEngagementRepository::new();
        repo.expect_toggle_like()
            .returning(|_, _| Err(DomainError::Internal("connection reset".into())));

        let err = EngagementService::new(Arc::new(repo))
            .toggle_like(VideoId(3), Some("s1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
