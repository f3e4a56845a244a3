//! Error types for the newscrawl collaborators
//!
//! This module defines the domain-specific errors raised while fetching pages,
//! parsing articles and reading feeds.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Server responded with status {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport session was closed before the request was issued
    #[error("Transport session is closed")]
    SessionClosed,
}

impl FetchError {
    /// Classify a reqwest error, separating timeouts from other transport failures
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors that can occur while parsing an article page
#[derive(Error, Debug)]
pub enum ParseError {
    /// Neither a title nor any body text could be found
    #[error("No article content found in page")]
    ContentNotFound,

    /// Response was not an HTML document
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    /// Page was empty
    #[error("Empty document")]
    EmptyDocument,
}

/// Errors reported by an article extractor
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Download failed
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Download succeeded but the page could not be parsed
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Anything the extractor did not anticipate
    #[error("{0}")]
    Internal(String),
}

impl ExtractionError {
    /// Whether this is an internal fault rather than a download/parse failure
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Terminal failure of one feed's discovery
#[derive(Error, Debug)]
pub enum FeedError {
    /// Feed could not be downloaded
    #[error("RSS fetch error: {source}")]
    Fetch {
        feed_url: String,
        #[source]
        source: FetchError,
    },

    /// Feed body was not a recognizable feed document
    #[error("RSS parsing error: {reason}")]
    Parse { feed_url: String, reason: String },

    /// Feed was readable but had no entries
    #[error("No entries found in RSS feed")]
    NoEntries { feed_url: String },
}

impl FeedError {
    /// URL of the feed that failed
    pub fn feed_url(&self) -> &str {
        match self {
            Self::Fetch { feed_url, .. }
            | Self::Parse { feed_url, .. }
            | Self::NoEntries { feed_url } => feed_url,
        }
    }

    /// Human-readable reason, identical to the `Display` output
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Parse { .. } => "parse",
            Self::NoEntries { .. } => "no_entries",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_accessors() {
        let err = FeedError::NoEntries {
            feed_url: "https://example.com/rss".to_string(),
        };
        assert_eq!(err.feed_url(), "https://example.com/rss");
        assert_eq!(err.reason(), "No entries found in RSS feed");
        assert_eq!(err.kind(), "no_entries");
    }

    #[test]
    fn test_extraction_error_display_is_transparent() {
        let err = ExtractionError::from(FetchError::ServerError(404));
        assert_eq!(err.to_string(), "Server responded with status 404");
        assert!(!err.is_internal());
        assert!(ExtractionError::Internal("boom".into()).is_internal());
    }
}
