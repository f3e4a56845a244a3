//! newscrawl - News discovery and aggregation for automation agents
//!
//! Extracts structured article data from news pages and RSS/Atom feeds,
//! and searches across many feeds concurrently.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Shared HTTP session with rate limiting, page fetching
//! - [`parser`] - HTML article parsing, keywords and summaries
//! - [`feed`] - Feed reading
//! - [`aggregator`] - Extraction, batch, discovery, search and summary operations
//! - [`tools`] - Named tools and the stdio JSON-RPC server
//! - [`models`] - Core data structures and types
//! - [`metrics`] - Prometheus counters
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use newscrawl::aggregator::Aggregator;
//! use newscrawl::config::Config;
//! use newscrawl::crawler::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let session = Session::open(&config)?;
//!     let aggregator = Aggregator::with_session(session.clone(), &config);
//!
//!     let record = aggregator.extract("https://example.com/news/story", "en").await;
//!     println!("{}", serde_json::to_string_pretty(&record)?);
//!
//!     session.close();
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod config;
pub mod crawler;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod tools;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregator::{Aggregator, AggregatorSettings};
    pub use crate::config::Config;
    pub use crate::crawler::Session;
    pub use crate::error::{CrawlErrorTrait, Error, ErrorCategory, Result};
    pub use crate::feed::{FeedReader, HttpFeedReader};
    pub use crate::models::{
        AggregationRequest, ArticleContent, ArticleRecord, FailureKind, FeedEntry, FeedMetadata,
        SummaryOutcome, SummaryRecord,
    };
    pub use crate::parser::{ArticleExtractor, HtmlArticleExtractor};
    pub use crate::tools::ToolRouter;
}

// Direct re-exports for convenience
pub use models::{ArticleContent, ArticleRecord, FeedEntry};
