//! Unified error handling for the newscrawl crate
//!
//! This module consolidates the domain-specific errors into a single `Error`
//! enum while keeping the domain types available for callers that need them.
//!
//! # Architecture
//!
//! - [`CrawlErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification used by the tool boundary and logs
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use newscrawl::error::{CrawlErrorTrait, Error, ErrorCategory};
//!
//! fn report(err: &Error) {
//!     if err.category() == ErrorCategory::Validation {
//!         eprintln!("bad request: {err}");
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{ExtractionError, FeedError, FetchError, ParseError};

/// Common trait for all newscrawl error types
pub trait CrawlErrorTrait: std::error::Error {
    /// Check if a retrying caller could reasonably try again.
    ///
    /// Nothing in this crate retries; the flag is informational.
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Article download or parse failure
    Extraction,
    /// A feed could not be read or was empty
    Feed,
    /// Unexpected fault
    Internal,
    /// Malformed or unknown request at the tool boundary
    Validation,
}

impl ErrorCategory {
    /// Stable label, used as a metrics/log field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extraction => "extraction",
            Self::Feed => "feed",
            Self::Internal => "internal",
            Self::Validation => "validation",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CrawlErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::ServerError(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::InvalidUrl(_) | Self::SessionClosed => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Extraction
    }
}

impl CrawlErrorTrait for ExtractionError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(_) | Self::Internal(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        if self.is_internal() {
            ErrorCategory::Internal
        } else {
            ErrorCategory::Extraction
        }
    }
}

impl CrawlErrorTrait for FeedError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch { source, .. } => source.is_recoverable(),
            Self::Parse { .. } | Self::NoEntries { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Feed
    }
}

/// Unified error type for the newscrawl crate
#[derive(Error, Debug)]
pub enum Error {
    /// Article extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Feed discovery errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Request validation errors
    #[error("{0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrawlErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Extraction(e) => e.is_recoverable(),
            Self::Feed(e) => e.is_recoverable(),
            Self::Validation(_) | Self::Json(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Extraction(e) => e.category(),
            Self::Feed(_) => ErrorCategory::Feed,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Json(_) => ErrorCategory::Internal,
        }
    }
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
