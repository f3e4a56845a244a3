//! HTML page fetcher with charset detection
//!
//! Downloads article pages through the shared [`Session`] and decodes the
//! body into UTF-8:
//! - Charset from the `Content-Type` header
//! - Charset from an HTML `<meta>` tag in the first kilobytes
//! - UTF-8 (lossy) as the last resort
//!
//! A single attempt is made per page; failures are reported, not retried.

use crate::crawler::Session;
use crate::utils::error::{FetchError, ParseError};
use crate::utils::parse_http_url;
use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([a-zA-Z0-9_\-]+)"#).unwrap()
});

/// How many bytes to scan for a `<meta charset>` declaration
const META_SNIFF_BYTES: usize = 4096;

/// A downloaded and decoded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,

    /// Lowercased `Content-Type` header value, empty when absent
    pub content_type: String,

    /// Decoded body
    pub body: String,
}

/// Article page fetcher
#[derive(Debug, Clone)]
pub struct PageFetcher {
    session: Session,
}

impl PageFetcher {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Fetch an HTML page.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for non-http(s) URLs, the session's
    /// transport errors otherwise.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = parse_http_url(url)?;

        let response = self.session.get(parsed.as_str()).await?;

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(FetchError::from_reqwest)?;
        let body = decode_bytes(&bytes, &content_type);

        tracing::debug!(url = %final_url, bytes = bytes.len(), "Fetched page");

        Ok(FetchedPage {
            final_url,
            content_type,
            body,
        })
    }
}

impl FetchedPage {
    /// Reject responses that are clearly not HTML documents
    pub fn ensure_html(&self) -> Result<(), ParseError> {
        let ct = self.content_type.as_str();
        if ct.is_empty() || ct.contains("html") || ct.contains("xml") || ct.starts_with("text/plain")
        {
            Ok(())
        } else {
            Err(ParseError::UnsupportedContent(ct.to_string()))
        }
    }
}

/// Decode bytes to a UTF-8 string.
///
/// Tries the header charset, then a `<meta>` charset, then UTF-8. When every
/// candidate reports malformed input the lossy UTF-8 decoding is returned.
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> String {
    let candidates = [
        charset_from_content_type(content_type),
        charset_from_meta(bytes),
        Some(UTF_8),
    ];

    for encoding in candidates.into_iter().flatten() {
        if let Some(text) = decode_with(encoding, bytes) {
            return text;
        }
    }

    let (cow, _, _) = UTF_8.decode(bytes);
    cow.into_owned()
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    let (cow, _encoding, had_errors) = encoding.decode(bytes);
    (!had_errors).then(|| cow.into_owned())
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("charset="))
        .next()
        .and_then(|label| Encoding::for_label(label.trim_matches('"').as_bytes()))
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let head = String::from_utf8_lossy(head);
    let caps = META_CHARSET_REGEX.captures(&head)?;
    Encoding::for_label(caps.get(1)?.as_str().as_bytes())
}
