//! Feed discovery: read a feed, extract its first entries, politely

use super::Aggregator;
use crate::error::CrawlErrorTrait;
use crate::metrics;
use crate::models::{ArticleRecord, FeedMetadata};
use crate::utils::error::FeedError;

impl Aggregator {
    /// Extract up to `max_articles` articles linked from a feed.
    ///
    /// Entries are taken in feed order; entries without a link are skipped.
    /// Successive extractions are separated by the configured politeness
    /// delay. Each record carries the entry's `rss_*` metadata.
    ///
    /// # Errors
    ///
    /// Returns a `FeedError` when the feed cannot be read or has no entries.
    /// Article-level failures never end discovery.
    pub async fn discover(
        &self,
        feed_url: &str,
        max_articles: usize,
    ) -> Result<Vec<ArticleRecord>, FeedError> {
        let entries = match self.feeds.read(feed_url).await {
            Ok(entries) if entries.is_empty() => Err(FeedError::NoEntries {
                feed_url: feed_url.to_string(),
            }),
            other => other,
        }
        .inspect_err(|e| {
            metrics::record_feed_error(e.kind());
            tracing::warn!(
                feed = %feed_url,
                error = %e,
                recoverable = e.is_recoverable(),
                "Feed discovery failed"
            );
        })?;

        tracing::info!(
            feed = %feed_url,
            entries = entries.len(),
            max_articles,
            "Discovering articles from feed"
        );

        let language = self.settings.default_language.as_str();
        let mut records = Vec::new();

        for entry in entries.iter().take(max_articles) {
            let Some(link) = entry.link.as_deref() else {
                tracing::debug!(feed = %feed_url, title = ?entry.title, "Skipping entry without link");
                continue;
            };

            if !records.is_empty() && !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }

            let record = self
                .extract(link, language)
                .await
                .with_feed_metadata(FeedMetadata::from(entry));
            records.push(record);
        }

        Ok(records)
    }
}
