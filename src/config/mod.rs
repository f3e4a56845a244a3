//! Configuration management for newscrawl
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Browser-like User-Agent; many news sites refuse obvious bot agents
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Feeds searched when a request does not name any
pub const DEFAULT_FEEDS: &[&str] = &[
    "http://rss.cnn.com/rss/edition.rss",
    "https://feeds.bbci.co.uk/news/rss.xml",
    "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Feed source configuration
    #[serde(default)]
    pub feeds: FeedsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,

    /// Session-wide rate limit (requests per second)
    pub rate_limit: f64,

    /// Delay between consecutive article fetches within one feed, in milliseconds
    pub politeness_delay_ms: u64,

    /// Maximum number of feeds discovered concurrently by a search
    pub max_concurrent_feeds: usize,

    /// Language hint used when a caller does not supply one
    pub default_language: String,
}

/// Feed source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Feed URLs searched when a search request names none
    pub default_feeds: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let request_timeout_secs = std::env::var("NEWSCRAWL_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.request_timeout_secs);

        let user_agent =
            std::env::var("NEWSCRAWL_USER_AGENT").unwrap_or(defaults.crawler.user_agent);

        let rate_limit = std::env::var("NEWSCRAWL_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.crawler.rate_limit);

        let politeness_delay_ms = std::env::var("NEWSCRAWL_POLITENESS_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.politeness_delay_ms);

        let max_concurrent_feeds = std::env::var("NEWSCRAWL_MAX_CONCURRENT_FEEDS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.crawler.max_concurrent_feeds);

        let default_language = std::env::var("NEWSCRAWL_LANGUAGE")
            .unwrap_or(defaults.crawler.default_language);

        let default_feeds = std::env::var("NEWSCRAWL_DEFAULT_FEEDS")
            .ok()
            .map(|v| parse_feed_list(&v))
            .filter(|feeds| !feeds.is_empty())
            .unwrap_or(defaults.feeds.default_feeds);

        let log_level =
            std::env::var("NEWSCRAWL_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format =
            std::env::var("NEWSCRAWL_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            crawler: CrawlerConfig {
                request_timeout_secs,
                user_agent,
                rate_limit,
                politeness_delay_ms,
                max_concurrent_feeds,
                default_language,
            },
            feeds: FeedsConfig { default_feeds },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.crawler.rate_limit <= 0.0 || !self.crawler.rate_limit.is_finite() {
            anyhow::bail!("rate_limit must be positive");
        }

        if self.crawler.max_concurrent_feeds == 0 {
            anyhow::bail!("max_concurrent_feeds must be greater than 0");
        }

        if self.crawler.default_language.trim().is_empty() {
            anyhow::bail!("default_language must not be empty");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Get the inter-article politeness delay as Duration
    #[must_use]
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.crawler.politeness_delay_ms)
    }
}

fn parse_feed_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                request_timeout_secs: 10,
                user_agent: DEFAULT_USER_AGENT.to_string(),
                rate_limit: 10.0,
                politeness_delay_ms: 1000,
                max_concurrent_feeds: 3,
                default_language: String::from("en"),
            },
            feeds: FeedsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            default_feeds: DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feeds.default_feeds.len(), 3);
    }

    #[test]
    fn test_invalid_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent_feeds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rate_limit() {
        let mut config = Config::default();
        config.crawler.rate_limit = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_conversions() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.politeness_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_feed_list() {
        let feeds = parse_feed_list(" https://a.example/rss , ,https://b.example/atom");
        assert_eq!(feeds, vec!["https://a.example/rss", "https://b.example/atom"]);
    }
}
