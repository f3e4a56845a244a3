//! Aggregation orchestrator
//!
//! [`Aggregator`] composes the article extractor and the feed reader into
//! the five operations exposed to callers:
//!
//! - [`Aggregator::extract`] - one URL, never fails (see `extract.rs`)
//! - [`Aggregator::extract_many`] - many URLs, order preserved
//! - [`Aggregator::discover`] - bounded, paced extraction of one feed
//! - [`Aggregator::search`] - concurrent discovery across feeds plus filtering
//! - [`Aggregator::summarize`] - condensed view of one article
//!
//! Each request owns its results; the only shared state is whatever the
//! collaborators share (the HTTP session in production).

mod batch;
mod discover;
mod extract;
mod search;
mod summary;

pub use search::matches_query;
pub use summary::fallback_summary;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::crawler::Session;
use crate::feed::{FeedReader, HttpFeedReader};
use crate::parser::{ArticleExtractor, HtmlArticleExtractor};

/// Runtime knobs taken from [`Config`] at construction time
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Language hint passed to the extractor by feed discovery and summaries
    pub default_language: String,

    /// Pause between successive extractions within one feed
    pub politeness_delay: Duration,

    /// How many feeds a search reads at once
    pub max_concurrent_feeds: usize,

    /// Feeds searched when a request names none
    pub default_feeds: Vec<String>,
}

impl From<&Config> for AggregatorSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_language: config.crawler.default_language.clone(),
            politeness_delay: config.politeness_delay(),
            max_concurrent_feeds: config.crawler.max_concurrent_feeds.max(1),
            default_feeds: config.feeds.default_feeds.clone(),
        }
    }
}

/// Entry point for all aggregation operations
#[derive(Clone)]
pub struct Aggregator {
    extractor: Arc<dyn ArticleExtractor>,
    feeds: Arc<dyn FeedReader>,
    settings: AggregatorSettings,
}

impl Aggregator {
    /// Build an aggregator over arbitrary collaborators
    pub fn new(
        extractor: Arc<dyn ArticleExtractor>,
        feeds: Arc<dyn FeedReader>,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            extractor,
            feeds,
            settings,
        }
    }

    /// Build the production aggregator: HTML extraction and feed reading
    /// over one shared session
    pub fn with_session(session: Session, config: &Config) -> Self {
        Self::new(
            Arc::new(HtmlArticleExtractor::new(session.clone())),
            Arc::new(HttpFeedReader::new(session)),
            AggregatorSettings::from(config),
        )
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
