use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{NewSuggestion, Result, Suggestion, SuggestionRepository, SuggestionStatus, UserId};

use super::{db_error, PgStore};

#[derive(sqlx::FromRow)]
struct SuggestionRow {
    id: i32,
    url: String,
    title: String,
    description: Option<String>,
    status: String,
    user_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SuggestionRow> for Suggestion {
    type Error = domains::DomainError;

    fn try_from(row: SuggestionRow) -> Result<Self> {
        Ok(Suggestion {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            status: row.status.parse()?,
            user_id: row.user_id.map(UserId),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl SuggestionRepository for PgStore {
    async fn create(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
        sqlx::query_as::<_, SuggestionRow>(
            "INSERT INTO video_suggestions (url, title, description, status, user_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, url, title, description, status, user_id, created_at",
        )
        .bind(suggestion.url)
        .bind(suggestion.title)
        .bind(suggestion.description)
        .bind(SuggestionStatus::Pending.as_str())
        .bind(suggestion.user_id.map(|u| u.0))
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?
        .try_into()
    }
}
