//! HTTP handlers. Each one parses its input, calls a single service and
//! shapes the JSON the client expects.

pub mod auth;
pub mod health;
pub mod suggestions;
pub mod videos;
