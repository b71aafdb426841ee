//! Account endpoints. Tokens are stateless, so logout is an acknowledgement
//! and the client forgets its token.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use domains::{DomainError, User};
use serde::{Deserialize, Serialize};
use services::AuthSession;

use crate::error::ApiError;
use crate::extract::BearerToken;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn auth_response(message: &'static str, session: AuthSession) -> Json<AuthResponse> {
    Json(AuthResponse { message, user: session.user, token: session.token })
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(body) = payload?;
    let session = state
        .accounts
        .register(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(auth_response("Registration successful", session))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(body) = payload?;
    let session = state
        .accounts
        .login(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(auth_response("Login successful", session))
}

/// POST /api/logout
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Logout successful" })
}

/// GET /api/user
pub async fn current_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<User>, ApiError> {
    let token = token.ok_or_else(|| DomainError::Unauthorized("Not logged in".into()))?;
    Ok(Json(state.accounts.current_user(&token).await?))
}
