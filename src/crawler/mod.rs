//! Shared HTTP transport with rate limiting
//!
//! [`Session`] is the single HTTP handle every collaborator fetches through.
//! It is opened once at startup, cloned into the page fetcher and the feed
//! reader, and closed once at shutdown.

pub mod fetcher;

use anyhow::{Context, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::utils::error::FetchError;

struct SessionInner {
    /// HTTP client (connection pool lives here)
    client: Client,

    /// Session-wide rate limiter
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    open: AtomicBool,
}

/// Process-scoped HTTP session
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a new session from configuration
    pub fn open(config: &Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let client = Client::builder()
            .user_agent(&config.crawler.user_agent)
            .timeout(config.request_timeout())
            .gzip(true)
            .build()
            .context("Failed to create HTTP client")?;

        let rate = NonZeroU32::new(config.crawler.rate_limit.ceil() as u32)
            .context("Invalid rate limit value")?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        tracing::info!(
            timeout_secs = config.crawler.request_timeout_secs,
            rate_limit = config.crawler.rate_limit,
            "Transport session opened"
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                client,
                rate_limiter,
                open: AtomicBool::new(true),
            }),
        })
    }

    /// Close the session. Requests issued afterwards fail with `SessionClosed`.
    pub fn close(&self) {
        if self.inner.open.swap(false, Ordering::SeqCst) {
            tracing::info!("Transport session closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::SeqCst)
    }

    /// Issue a GET, waiting on the rate limiter first.
    ///
    /// Non-2xx responses are returned as `FetchError::ServerError`.
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        if !self.is_open() {
            return Err(FetchError::SessionClosed);
        }

        self.inner.rate_limiter.until_ready().await;

        tracing::debug!(url = %url, "Fetching URL");

        let response = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_creation() {
        let session = Session::open(&Config::default());
        assert!(session.is_ok());
        assert!(session.unwrap().is_open());
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = Config::default();
        config.crawler.max_concurrent_feeds = 0;
        assert!(Session::open(&config).is_err());
    }

    #[tokio::test]
    async fn test_closed_session_rejects_requests() {
        let session = Session::open(&Config::default()).unwrap();
        let clone = session.clone();
        session.close();

        assert!(!clone.is_open());
        let result = clone.get("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(FetchError::SessionClosed)));
    }
}
