//! Tool surface
//!
//! Exposes the aggregator's operations as named tools taking JSON arguments
//! and returning pretty-printed JSON text. Every failure, including unknown
//! tools and bad arguments, comes back as `{"success": false, "error": ...}`
//! rather than an `Err`.

pub mod server;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

use crate::aggregator::Aggregator;
use crate::error::{CrawlErrorTrait, Error, Result};
use crate::metrics;
use crate::models::AggregationRequest;

pub const CRAWL_NEWS_ARTICLE: &str = "crawl_news_article";
pub const EXTRACT_MULTIPLE_NEWS_ARTICLES: &str = "extract_multiple_news_articles";
pub const DISCOVER_NEWS_FROM_RSS: &str = "discover_news_from_rss";
pub const SEARCH_AND_EXTRACT_NEWS: &str = "search_and_extract_news";
pub const GET_NEWS_SUMMARY: &str = "get_news_summary";

const TOOL_NAMES: [&str; 5] = [
    CRAWL_NEWS_ARTICLE,
    EXTRACT_MULTIPLE_NEWS_ARTICLES,
    DISCOVER_NEWS_FROM_RSS,
    SEARCH_AND_EXTRACT_NEWS,
    GET_NEWS_SUMMARY,
];

/// Tool metadata as advertised by `tools/list`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

// ============================================================================
// Arguments
// ============================================================================

fn default_language() -> String {
    "en".to_string()
}

fn default_max_articles() -> usize {
    10
}

fn default_max_results() -> usize {
    5
}

fn default_summary_length() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
struct CrawlArgs {
    url: String,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Debug, Deserialize)]
struct BatchArgs {
    urls: Vec<String>,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Debug, Deserialize)]
struct DiscoverArgs {
    rss_url: String,
    #[serde(default = "default_max_articles")]
    max_articles: usize,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    rss_feeds: Option<Vec<String>>,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SummaryArgs {
    url: String,
    #[serde(default = "default_summary_length")]
    summary_length: i64,
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };

    serde_json::from_value(arguments)
        .map_err(|e| Error::validation(format!("Invalid arguments for {tool}: {e}")))
}

// ============================================================================
// Catalogue
// ============================================================================

/// Definitions of all five tools
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CRAWL_NEWS_ARTICLE,
            description: "Extract and parse a single news article",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {"type": "string", "description": "The URL of the news article to crawl"},
                    "language": {"type": "string", "description": "Language of the article", "default": "en"}
                },
                "required": ["url"]
            }),
        },
        ToolDefinition {
            name: EXTRACT_MULTIPLE_NEWS_ARTICLES,
            description: "Extract multiple news articles at once",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "urls": {"type": "array", "items": {"type": "string"}, "description": "List of URLs to crawl"},
                    "language": {"type": "string", "description": "Language of the articles", "default": "en"}
                },
                "required": ["urls"]
            }),
        },
        ToolDefinition {
            name: DISCOVER_NEWS_FROM_RSS,
            description: "Discover news articles from an RSS feed and extract their content",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "rss_url": {"type": "string", "description": "URL of the RSS feed"},
                    "max_articles": {"type": "integer", "description": "Maximum number of articles to extract", "default": 10}
                },
                "required": ["rss_url"]
            }),
        },
        ToolDefinition {
            name: SEARCH_AND_EXTRACT_NEWS,
            description: "Search for news across multiple RSS feeds and extract content",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query to look for in news articles"},
                    "rss_feeds": {"type": "array", "items": {"type": "string"}, "description": "List of RSS feed URLs to search"},
                    "max_results": {"type": "integer", "description": "Maximum number of results to return", "default": 5}
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: GET_NEWS_SUMMARY,
            description: "Get a summarized version of a news article with key points",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {"type": "string", "description": "URL of the news article"},
                    "summary_length": {"type": "integer", "description": "Number of sentences for the summary", "default": 5}
                },
                "required": ["url"]
            }),
        },
    ]
}

// ============================================================================
// Dispatch
// ============================================================================

/// Routes tool calls to the aggregator
#[derive(Debug, Clone)]
pub struct ToolRouter {
    aggregator: Aggregator,
}

impl ToolRouter {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }

    /// Run a tool and render its JSON payload. Never fails.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> String {
        let started = Instant::now();
        let outcome = self.dispatch(name, arguments).await;

        let label = if TOOL_NAMES.contains(&name) { name } else { "unknown" };
        metrics::record_tool_call(label, outcome.is_ok(), started.elapsed().as_secs_f64());

        let payload = outcome.unwrap_or_else(|e| {
            tracing::warn!(tool = %name, category = %e.category(), error = %e, "Tool call failed");
            error_payload(&e)
        });

        serde_json::to_string_pretty(&payload).unwrap_or_else(|e| {
            json!({"success": false, "error": format!("Unexpected error: {e}")}).to_string()
        })
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value> {
        tracing::info!(tool = %name, "Tool call");

        match name {
            CRAWL_NEWS_ARTICLE => {
                let args: CrawlArgs = parse_args(name, arguments)?;
                let record = self.aggregator.extract(&args.url, &args.language).await;
                Ok(serde_json::to_value(record)?)
            }
            EXTRACT_MULTIPLE_NEWS_ARTICLES => {
                let args: BatchArgs = parse_args(name, arguments)?;
                let records = self.aggregator.extract_many(&args.urls, &args.language).await;
                Ok(serde_json::to_value(records)?)
            }
            DISCOVER_NEWS_FROM_RSS => {
                let args: DiscoverArgs = parse_args(name, arguments)?;
                let records = self
                    .aggregator
                    .discover(&args.rss_url, args.max_articles)
                    .await?;
                Ok(serde_json::to_value(records)?)
            }
            SEARCH_AND_EXTRACT_NEWS => {
                let args: SearchArgs = parse_args(name, arguments)?;
                let request = AggregationRequest::new(args.query, args.rss_feeds, args.max_results);
                let records = self.aggregator.search(&request).await;
                Ok(serde_json::to_value(records)?)
            }
            GET_NEWS_SUMMARY => {
                let args: SummaryArgs = parse_args(name, arguments)?;
                let outcome = self.aggregator.summarize(&args.url, args.summary_length).await;
                Ok(serde_json::to_value(outcome)?)
            }
            _ => Err(Error::validation(format!("Unknown tool: {name}"))),
        }
    }
}

/// `{"success": false, "error": <message>}`; feed failures also carry
/// `rss_url` and report the bare feed reason.
pub fn error_payload(err: &Error) -> Value {
    match err {
        Error::Feed(e) => json!({
            "success": false,
            "error": e.reason(),
            "rss_url": e.feed_url(),
        }),
        other => json!({
            "success": false,
            "error": other.to_string(),
        }),
    }
}
