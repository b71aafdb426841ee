//! auth-adapters
//!
//! Credential adapters for the `PasswordHasher` and `TokenIssuer` ports.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::Argon2Hasher;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtIssuer;
