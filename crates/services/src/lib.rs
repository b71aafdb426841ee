//! services
//!
//! Use cases of the feed, written against the port traits in `domains`.
//! Each service is stateless apart from its `Arc<dyn Port>` handles and can
//! be shared freely across request tasks.

pub mod accounts;
pub mod engagement;
pub mod feed;
pub mod suggestions;
pub mod validation;

pub use accounts::{AccountService, AuthSession};
pub use engagement::EngagementService;
pub use feed::{FeedLimits, FeedService};
pub use suggestions::SuggestionService;
