//! Feed reading
//!
//! [`FeedReader`] turns a feed URL into an ordered list of [`FeedEntry`]s.
//! [`HttpFeedReader`] downloads through the shared [`Session`] and parses
//! RSS 0.9x/1.0/2.0, Atom and JSON Feed documents with `feed-rs`.

use async_trait::async_trait;
use feed_rs::parser;

use crate::crawler::Session;
use crate::models::FeedEntry;
use crate::utils::error::{FeedError, FetchError};

/// Source of feed entries
///
/// An empty feed is not an error at this level; the caller decides what an
/// empty entry list means.
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Read all entries of a feed, in feed order.
    async fn read(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError>;
}

/// Feed reader backed by HTTP
#[derive(Debug, Clone)]
pub struct HttpFeedReader {
    session: Session,
}

impl HttpFeedReader {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl FeedReader for HttpFeedReader {
    async fn read(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let fetch_failed = |source: FetchError| FeedError::Fetch {
            feed_url: feed_url.to_string(),
            source,
        };

        let response = self.session.get(feed_url).await.map_err(fetch_failed)?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_failed(FetchError::from_reqwest(e)))?;

        let entries = parse_feed(&bytes, feed_url)?;
        tracing::debug!(feed = %feed_url, entries = entries.len(), "Read feed");

        Ok(entries)
    }
}

/// Parse a feed document into entries.
///
/// # Errors
///
/// Returns `FeedError::Parse` if the bytes are not a recognizable feed.
pub fn parse_feed(bytes: &[u8], feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let feed = parser::parse(bytes).map_err(|e| FeedError::Parse {
        feed_url: feed_url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(feed.entries.into_iter().map(convert_entry).collect())
}

fn convert_entry(entry: feed_rs::model::Entry) -> FeedEntry {
    let link = entry
        .links
        .first()
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty());

    FeedEntry {
        link,
        title: entry.title.map(|t| t.content.trim().to_string()),
        published: entry.published.or(entry.updated).map(|dt| dt.to_rfc2822()),
        summary: entry.summary.map(|s| s.content.trim().to_string()),
    }
}
