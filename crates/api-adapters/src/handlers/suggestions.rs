//! Suggestion intake endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use domains::{NewSuggestion, Suggestion};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::extract::BearerToken;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSuggestionRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// POST /api/video-suggestions
///
/// Signed-in callers get the suggestion linked to their account. A token
/// that does not verify is treated as anonymous.
pub async fn create_suggestion(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    payload: Result<Json<CreateSuggestionRequest>, JsonRejection>,
) -> Result<Json<Suggestion>, ApiError> {
    let Json(body) = payload?;

    let user_id = match token {
        Some(token) => match state.accounts.current_user(&token).await {
            Ok(user) => Some(user.id),
            Err(e) => {
                debug!(error = %e, "suggestion submitted with unusable token");
                None
            }
        },
        None => None,
    };

    let suggestion = state
        .suggestions
        .submit(NewSuggestion {
            url: body.url.unwrap_or_default(),
            title: body.title.unwrap_or_default(),
            description: body.description,
            user_id,
        })
        .await
        .map_err(|e| ApiError::from(e).or_internal("Failed to create video suggestion"))?;
    state.metrics.suggestions.inc();
    Ok(Json(suggestion))
}
