//! # DomainError
//!
//! Centralized error handling for the feed.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain and port operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resource not found (e.g., Video, User)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., missing session id, malformed URL)
    #[error("{0}")]
    ValidationError(String),

    /// Bad credentials or an invalid token
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, pool exhausted)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        DomainError::NotFound(resource.to_string(), id.to_string())
    }
}

/// A specialized Result type for feed logic.
pub type Result<T> = std::result::Result<T, DomainError>;
