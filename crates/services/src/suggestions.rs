//! Suggestion intake. Moderation happens elsewhere; everything lands as pending.

use std::sync::Arc;

use domains::{NewSuggestion, Result, Suggestion, SuggestionRepository};
use tracing::info;

use crate::validation;

pub struct SuggestionService {
    repo: Arc<dyn SuggestionRepository>,
}

impl SuggestionService {
    pub fn new(repo: Arc<dyn SuggestionRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, suggestion), fields(user_id = ?suggestion.user_id))]
    pub async fn submit(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
        let suggestion = NewSuggestion {
            url: validation::video_url(&suggestion.url)?,
            title: validation::title(&suggestion.title)?,
            description: validation::optional_text(suggestion.description),
            user_id: suggestion.user_id,
        };
        let created = self.repo.create(suggestion).await?;
        info!(suggestion_id = created.id, "suggestion queued");
        Ok(created)
    }
}
