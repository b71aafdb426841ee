//! domains
//!
//! The central domain models, error type and port definitions for shortfeed.
//! Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn session_id_is_trimmed() {
        let id = SessionId::parse("  abc-123 ").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn blank_session_id_is_rejected() {
        let err = SessionId::parse("   ").unwrap_err();
        assert_eq!(err, DomainError::ValidationError("Session ID is required".into()));
    }

    #[test]
    fn oversized_session_id_is_rejected() {
        let raw = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(matches!(SessionId::parse(&raw), Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn session_id_limit_counts_characters() {
        let accented = "é".repeat(MAX_SESSION_ID_LEN);
        assert_eq!(SessionId::parse(&accented).unwrap().as_str(), accented);
        assert!(SessionId::parse(&format!("{accented}é")).is_err());
    }

    #[test]
    fn video_serializes_camel_case() {
        let video = Video {
            id: VideoId(7),
            url: "https://cdn.example.com/v/7.mp4".into(),
            title: "Sunset".into(),
            description: None,
            category: Some("nature".into()),
            views: 3,
            likes: 1,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "nature");
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: UserId(1),
            email: "a@b.io".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"email\":\"a@b.io\""));
    }

    #[test]
    fn suggestion_status_round_trips_through_str() {
        for status in [
            SuggestionStatus::Pending,
            SuggestionStatus::Approved,
            SuggestionStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<SuggestionStatus>().unwrap(), status);
        }
        assert!("archived".parse::<SuggestionStatus>().is_err());
    }

    #[test]
    fn default_suggestion_status_is_pending() {
        assert_eq!(SuggestionStatus::default(), SuggestionStatus::Pending);
    }
}
