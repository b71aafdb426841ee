//! Input normalization shared by the use cases.
//!
//! Everything here trims first and reports problems as
//! `DomainError::ValidationError` with a message fit for the client.

use domains::{DomainError, Result};
use url::Url;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Accepts absolute `http`/`https` URLs that name a host. The URL is stored
/// as submitted, minus surrounding whitespace.
pub fn video_url(raw: &str) -> Result<String> {
    let invalid = || DomainError::ValidationError("Please enter a valid video URL".into());
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(trimmed.to_string()),
        _ => Err(invalid()),
    }
}

pub fn title(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError("Title is required".into()));
    }
    Ok(trimmed.to_string())
}

/// Blank strings collapse to `None`.
pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Lowercases and checks the `local@domain.tld` shape.
pub fn email(raw: &str) -> Result<String> {
    let invalid = || DomainError::ValidationError("Invalid email address".into());
    let email = raw.trim().to_lowercase();
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(email)
}

pub fn password(raw: &str) -> Result<()> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::ValidationError(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
