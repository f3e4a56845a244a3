//! Common utilities and helper functions

pub mod error;

use url::Url;

use self::error::FetchError;

/// Parse an absolute http(s) URL with a host.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` for blank input, unparsable URLs, other
/// schemes and host-less URLs.
pub fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl("empty URL".to_string()));
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| FetchError::InvalidUrl(format!("{trimmed}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "{trimmed}: unsupported scheme {}",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(FetchError::InvalidUrl(format!("{trimmed}: missing host")));
    }

    Ok(parsed)
}
