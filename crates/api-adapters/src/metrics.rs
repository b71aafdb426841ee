//! Prometheus counters for the feed endpoints.

use prometheus_client::encoding::{text::encode, EncodeLabelSet, EncodeLabelValue};
use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum LikeAction {
    Like,
    Unlike,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct LikeLabels {
    pub action: LikeAction,
}

pub struct Metrics {
    registry: Registry,
    pub feed_pages: Counter,
    pub views: Counter,
    pub like_toggles: Family<LikeLabels, Counter>,
    pub suggestions: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("shortfeed");
        let feed_pages = Counter::default();
        let views = Counter::default();
        let like_toggles = Family::<LikeLabels, Counter>::default();
        let suggestions = Counter::default();

        registry.register("feed_pages", "Feed pages served", feed_pages.clone());
        registry.register("views", "Views recorded", views.clone());
        registry.register("like_toggles", "Like toggles by resulting action", like_toggles.clone());
        registry.register("suggestions", "Video suggestions accepted", suggestions.clone());

        Self { registry, feed_pages, views, like_toggles, suggestions }
    }

    pub fn record_toggle(&self, liked: bool) {
        let action = if liked { LikeAction::Like } else { LikeAction::Unlike };
        self.like_toggles.get_or_create(&LikeLabels { action }).inc();
    }

    /// OpenMetrics text exposition of every registered counter.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        encode(&mut out, &self.registry)?;
        Ok(out)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
