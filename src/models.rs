// Core data structures for newscrawl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured fields produced by a successful extraction
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ArticleContent {
    pub title: String,
    pub text: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub top_image: String,
    pub images: Vec<String>,
    pub movies: Vec<String>,
    pub meta_description: String,
    pub meta_lang: String,
    pub meta_favicon: String,
    pub meta_keywords: Vec<String>,
    pub canonical_link: String,
}

/// Why an extraction attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Download or parse failure reported by the extractor
    Extraction,
    /// Anything unexpected, including a panicking extractor
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extraction => "extraction_failure",
            Self::Internal => "internal_failure",
        }
    }
}

/// Metadata copied from the feed entry an article was discovered through
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeedMetadata {
    pub rss_title: Option<String>,
    pub rss_published: Option<String>,
    pub rss_summary: Option<String>,
}

impl From<&FeedEntry> for FeedMetadata {
    fn from(entry: &FeedEntry) -> Self {
        Self {
            rss_title: entry.title.clone(),
            rss_published: entry.published.clone(),
            rss_summary: entry.summary.clone(),
        }
    }
}

/// Outcome of one extraction attempt.
///
/// Content is present exactly when the attempt succeeded. Records are built
/// once through [`ArticleRecord::succeeded`] or [`ArticleRecord::failed`];
/// the only later change is attaching feed metadata, which consumes the record.
///
/// Serializes to the flat shape agents consume:
/// `url, title, text, ..., canonical_link, success[, error]` plus the
/// `rss_*` fields on feed-derived records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleRecord {
    url: String,

    #[serde(flatten)]
    content: Option<ArticleContent>,

    success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    #[serde(flatten)]
    feed: Option<FeedMetadata>,

    #[serde(skip)]
    failure: Option<FailureKind>,
}

impl ArticleRecord {
    /// Record for a successful extraction
    pub fn succeeded(url: impl Into<String>, content: ArticleContent) -> Self {
        Self {
            url: url.into(),
            content: Some(content),
            success: true,
            error: None,
            feed: None,
            failure: None,
        }
    }

    /// Record for a failed extraction
    pub fn failed(url: impl Into<String>, kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: None,
            success: false,
            error: Some(error.into()),
            feed: None,
            failure: Some(kind),
        }
    }

    /// Attach feed-origin metadata without touching the extracted fields
    #[must_use]
    pub fn with_feed_metadata(mut self, metadata: FeedMetadata) -> Self {
        self.feed = Some(metadata);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn content(&self) -> Option<&ArticleContent> {
        self.content.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn feed_metadata(&self) -> Option<&FeedMetadata> {
        self.feed.as_ref()
    }

    /// Title of a successful record, empty for failures
    pub fn title(&self) -> &str {
        self.content.as_ref().map_or("", |c| c.title.as_str())
    }
}

/// One item read from a feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub link: Option<String>,
    pub title: Option<String>,
    pub published: Option<String>,
    pub summary: Option<String>,
}

/// Parameters of one cross-feed search
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRequest {
    pub query: String,
    /// Feeds to search; `None` means the configured defaults
    pub feed_urls: Option<Vec<String>>,
    pub max_results: usize,
}

impl AggregationRequest {
    pub fn new(query: impl Into<String>, feed_urls: Option<Vec<String>>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            feed_urls,
            max_results,
        }
    }

    /// Feeds this request covers, substituting `defaults` when none were named
    pub fn feeds_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        self.feed_urls.as_deref().unwrap_or(defaults)
    }
}

/// Condensed view of one article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRecord {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub top_image: String,
    pub success: bool,
}

/// Result of summarizing a URL: a summary, or the failed extraction as-is
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SummaryOutcome {
    Summary(SummaryRecord),
    Failed(ArticleRecord),
}

impl SummaryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_content() -> ArticleContent {
        ArticleContent {
            title: "Rust 2.0 announced".to_string(),
            text: "Body text.".to_string(),
            keywords: vec!["rust".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_success_record_serializes_flat() {
        let record = ArticleRecord::succeeded("https://example.com/a", sample_content());
        let json: Value = serde_json::to_value(&record).unwrap();

        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["title"], "Rust 2.0 announced");
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
        assert!(json.get("rss_title").is_none());
        for field in [
            "text", "summary", "keywords", "authors", "publish_date", "top_image", "images",
            "movies", "meta_description", "meta_lang", "meta_favicon", "meta_keywords",
            "canonical_link",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_failed_record_has_no_content() {
        let record = ArticleRecord::failed(
            "https://example.com/b",
            FailureKind::Extraction,
            "Extraction error: Request timeout",
        );
        assert!(!record.is_success());
        assert!(record.content().is_none());
        assert_eq!(record.title(), "");
        assert_eq!(record.failure_kind(), Some(FailureKind::Extraction));

        let json: Value = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["error"], "Extraction error: Request timeout");
    }

    #[test]
    fn test_feed_metadata_is_additive() {
        let entry = FeedEntry {
            link: Some("https://example.com/a".into()),
            title: Some("Feed title".into()),
            published: None,
            summary: Some("Feed summary".into()),
        };
        let record = ArticleRecord::succeeded("https://example.com/a", sample_content())
            .with_feed_metadata(FeedMetadata::from(&entry));

        assert_eq!(record.title(), "Rust 2.0 announced");
        let json: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["rss_title"], "Feed title");
        assert_eq!(json["rss_published"], Value::Null);
        assert_eq!(json["rss_summary"], "Feed summary");
    }

    #[test]
    fn test_request_default_feeds() {
        let defaults = vec!["https://a.example/rss".to_string()];
        let request = AggregationRequest::new("rust", None, 5);
        assert_eq!(request.feeds_or(&defaults), defaults.as_slice());

        let explicit = AggregationRequest::new("rust", Some(vec![]), 5);
        assert!(explicit.feeds_or(&defaults).is_empty());
    }
}
