//! Common test utilities: scripted collaborators for the aggregator

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use newscrawl::aggregator::{Aggregator, AggregatorSettings};
use newscrawl::error::{ExtractionError, FeedError, FetchError, ParseError};
use newscrawl::feed::FeedReader;
use newscrawl::models::{ArticleContent, FeedEntry};
use newscrawl::parser::ArticleExtractor;

/// What the fake extractor does for one URL
#[derive(Debug, Clone)]
pub enum Script {
    Article(ArticleContent),
    Timeout,
    Status(u16),
    NoContent,
    Internal(String),
    Panic(String),
}

/// Extractor answering from a script; unscripted URLs succeed with a
/// title derived from the URL.
#[derive(Default)]
pub struct MockExtractor {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<(String, String, Instant)>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    pub fn article(self, url: &str, title: &str, text: &str) -> Self {
        self.with(url, Script::Article(content(title, text)))
    }

    /// URLs in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(u, _, _)| u.clone()).collect()
    }

    /// Language hints in call order
    pub fn languages(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, l, _)| l.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, _, t)| *t).collect()
    }
}

#[async_trait]
impl ArticleExtractor for MockExtractor {
    async fn extract(&self, url: &str, language: &str) -> Result<ArticleContent, ExtractionError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), language.to_string(), Instant::now()));

        match self.scripts.get(url) {
            None => Ok(content(&format!("Article at {url}"), "Body text.")),
            Some(Script::Article(c)) => Ok(c.clone()),
            Some(Script::Timeout) => Err(FetchError::Timeout.into()),
            Some(Script::Status(code)) => Err(FetchError::ServerError(*code).into()),
            Some(Script::NoContent) => Err(ParseError::ContentNotFound.into()),
            Some(Script::Internal(msg)) => Err(ExtractionError::Internal(msg.clone())),
            Some(Script::Panic(msg)) => panic!("{}", msg),
        }
    }
}

/// What the fake feed reader does for one feed
#[derive(Debug, Clone)]
pub enum FeedScript {
    Entries(Vec<FeedEntry>),
    /// Entries delivered after a delay
    Slow(Vec<FeedEntry>, Duration),
    Unreachable,
    Malformed,
}

#[derive(Default)]
pub struct MockFeedReader {
    feeds: HashMap<String, FeedScript>,
    reads: Mutex<Vec<String>>,
}

impl MockFeedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feed_url: &str, script: FeedScript) -> Self {
        self.feeds.insert(feed_url.to_string(), script);
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedReader for MockFeedReader {
    async fn read(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        self.reads.lock().unwrap().push(feed_url.to_string());

        match self.feeds.get(feed_url) {
            None => Ok(Vec::new()),
            Some(FeedScript::Entries(entries)) => Ok(entries.clone()),
            Some(FeedScript::Slow(entries, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(entries.clone())
            }
            Some(FeedScript::Unreachable) => Err(FeedError::Fetch {
                feed_url: feed_url.to_string(),
                source: FetchError::ServerError(503),
            }),
            Some(FeedScript::Malformed) => Err(FeedError::Parse {
                feed_url: feed_url.to_string(),
                reason: "no root element".to_string(),
            }),
        }
    }
}

pub fn content(title: &str, text: &str) -> ArticleContent {
    ArticleContent {
        title: title.to_string(),
        text: text.to_string(),
        ..Default::default()
    }
}

/// Feed entry with a link and a title
pub fn entry(link: &str, title: &str) -> FeedEntry {
    FeedEntry {
        link: Some(link.to_string()),
        title: Some(title.to_string()),
        published: Some("Tue, 05 Mar 2024 08:15:00 +0000".to_string()),
        summary: Some(format!("Summary of {title}")),
    }
}

/// Feed entry without a link
pub fn orphan_entry(title: &str) -> FeedEntry {
    FeedEntry {
        link: None,
        title: Some(title.to_string()),
        ..Default::default()
    }
}

pub fn settings(politeness_delay: Duration) -> AggregatorSettings {
    AggregatorSettings {
        default_language: "en".to_string(),
        politeness_delay,
        max_concurrent_feeds: 3,
        default_feeds: vec![
            "https://default-one.example/rss".to_string(),
            "https://default-two.example/rss".to_string(),
        ],
    }
}

/// Aggregator over the given fakes, keeping handles for assertions
pub fn aggregator(
    extractor: MockExtractor,
    feeds: MockFeedReader,
    politeness_delay: Duration,
) -> (Aggregator, Arc<MockExtractor>, Arc<MockFeedReader>) {
    let extractor = Arc::new(extractor);
    let feeds = Arc::new(feeds);
    let aggregator = Aggregator::new(
        extractor.clone(),
        feeds.clone(),
        settings(politeness_delay),
    );
    (aggregator, extractor, feeds)
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
