use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{NewVideo, PageWindow, Result, Video, VideoId, VideoRepository};

use super::{db_error, PgStore};

const VIDEO_COLUMNS: &str = "id, url, title, description, category, views, likes, created_at";

#[derive(sqlx::FromRow)]
struct VideoRow {
    id: i32,
    url: String,
    title: String,
    description: Option<String>,
    category: Option<String>,
    views: i32,
    likes: i32,
    created_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        Video {
            id: VideoId(row.id),
            url: row.url,
            title: row.title,
            description: row.description,
            category: row.category,
            views: row.views,
            likes: row.likes,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl VideoRepository for PgStore {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        let row = sqlx::query_as::<_, VideoRow>(&format!(
            "INSERT INTO videos (url, title, description, category, views, likes) \
             VALUES ($1, $2, $3, $4, 0, 0) RETURNING {VIDEO_COLUMNS}"
        ))
        .bind(video.url)
        .bind(video.title)
        .bind(video.description)
        .bind(video.category)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: VideoId) -> Result<Option<Video>> {
        let row = sqlx::query_as::<_, VideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(Video::from))
    }

    async fn random(&self) -> Result<Option<Video>> {
        let row = sqlx::query_as::<_, VideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos ORDER BY RANDOM() LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(Video::from))
    }

    /// Keyset page: `category = NULL` never matches, so uncategorized videos
    /// drop out whenever a filter is given.
    async fn list_window(&self, window: PageWindow) -> Result<Vec<Video>> {
        let rows = sqlx::query_as::<_, VideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos \
             WHERE ($1::INT4 IS NULL OR id > $1) \
               AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY id ASC \
             LIMIT $3"
        ))
        .bind(window.after.map(|c| c.0))
        .bind(window.category)
        .bind(i64::from(window.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(Video::from).collect())
    }
}
