use async_trait::async_trait;
use domains::{DomainError, EngagementRepository, LikeToggle, Result, SessionId, VideoId};
use tracing::debug;

use super::{db_error, PgStore};

#[async_trait]
impl EngagementRepository for PgStore {
    async fn record_view(&self, id: VideoId) -> Result<bool> {
        let result = sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomic toggle.
    ///
    /// The video row is locked first, so concurrent toggles on the same video
    /// queue behind each other and every one of them sees the ledger as the
    /// previous one left it. Any failure drops `tx` and rolls back.
    async fn toggle_like(&self, id: VideoId, session: &SessionId) -> Result<LikeToggle> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let locked = sqlx::query_scalar::<_, i32>("SELECT id FROM videos WHERE id = $1 FOR UPDATE")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;
        if locked.is_none() {
            return Err(DomainError::not_found("Video", id));
        }

        let removed = sqlx::query("DELETE FROM user_likes WHERE video_id = $1 AND session_id = $2")
            .bind(id.0)
            .bind(session.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected()
            > 0;

        let counter_sql = if removed {
            "UPDATE videos SET likes = GREATEST(likes - 1, 0) WHERE id = $1 RETURNING likes"
        } else {
            sqlx::query("INSERT INTO user_likes (video_id, session_id) VALUES ($1, $2)")
                .bind(id.0)
                .bind(session.as_str())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            "UPDATE videos SET likes = likes + 1 WHERE id = $1 RETURNING likes"
        };

        let likes = sqlx::query_scalar::<_, i32>(counter_sql)
            .bind(id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        debug!(video_id = %id, liked = !removed, likes, "toggle committed");
        Ok(LikeToggle { video_id: id, liked: !removed, likes })
    }

    async fn is_liked(&self, id: VideoId, session: &SessionId) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_likes WHERE video_id = $1 AND session_id = $2)",
        )
        .bind(id.0)
        .bind(session.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }
}
