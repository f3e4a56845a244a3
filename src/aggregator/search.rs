//! Cross-feed search

use futures::stream::{self, StreamExt};

use super::Aggregator;
use crate::models::{AggregationRequest, ArticleRecord};

impl Aggregator {
    /// Discover articles across feeds and keep the ones matching the query.
    ///
    /// Each feed is discovered with `max_articles = max_results`. Feeds run
    /// concurrently (bounded by `max_concurrent_feeds`) but results are
    /// merged in feed order. Failed feeds are logged and skipped. The
    /// output holds at most `max_results` records; duplicates across feeds
    /// are kept.
    pub async fn search(&self, request: &AggregationRequest) -> Vec<ArticleRecord> {
        let feeds = request.feeds_or(&self.settings.default_feeds);
        let query = request.query.to_lowercase();

        tracing::info!(
            query = %request.query,
            feeds = feeds.len(),
            max_results = request.max_results,
            "Searching feeds"
        );

        let per_feed: Vec<_> = stream::iter(feeds)
            .map(|feed| async move { (feed, self.discover(feed, request.max_results).await) })
            .buffered(self.settings.max_concurrent_feeds.max(1))
            .collect()
            .await;

        let mut matches = Vec::new();
        for (feed, outcome) in per_feed {
            match outcome {
                Ok(records) => {
                    matches.extend(records.into_iter().filter(|r| matches_query(r, &query)));
                }
                Err(e) => {
                    tracing::warn!(feed = %feed, error = %e, "Skipping feed");
                }
            }
        }

        matches.truncate(request.max_results);
        tracing::info!(query = %request.query, results = matches.len(), "Search finished");

        matches
    }
}

/// Relevance predicate: a successful record whose title, text or summary
/// contains `query_lower` (already lowercased).
pub fn matches_query(record: &ArticleRecord, query_lower: &str) -> bool {
    let Some(content) = record.content().filter(|_| record.is_success()) else {
        return false;
    };

    [&content.title, &content.text, &content.summary]
        .iter()
        .any(|field| field.to_lowercase().contains(query_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleContent, FailureKind};

    fn record(title: &str, text: &str, summary: &str) -> ArticleRecord {
        ArticleRecord::succeeded(
            "https://example.com/a",
            ArticleContent {
                title: title.to_string(),
                text: text.to_string(),
                summary: summary.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_matches_title_text_or_summary() {
        assert!(matches_query(&record("Rust Wins", "", ""), "rust"));
        assert!(matches_query(&record("", "all about RUST here", ""), "rust"));
        assert!(matches_query(&record("", "", "rusty summary"), "rust"));
        assert!(!matches_query(&record("Go", "Python", "Java"), "rust"));
    }

    #[test]
    fn test_failed_records_never_match() {
        let failed = ArticleRecord::failed("https://example.com/x", FailureKind::Extraction, "boom");
        assert!(!matches_query(&failed, ""));
    }
}
