//! Single-article extraction that never fails
//!
//! Whatever the extractor does (returns an error, reports an internal fault,
//! panics) the caller gets an [`ArticleRecord`] back.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

use super::Aggregator;
use crate::error::Error;
use crate::metrics;
use crate::models::{ArticleContent, ArticleRecord, FailureKind};
use crate::utils::error::ExtractionError;
use crate::utils::parse_http_url;

const UNEXPECTED_PREFIX: &str = "Unexpected error: ";

impl Aggregator {
    /// Extract one article into a record.
    ///
    /// Download and parse failures become `FailureKind::Extraction` records
    /// (message prefixed `Extraction error: `); internal faults and panics
    /// become `FailureKind::Internal` records (`Unexpected error: `).
    pub async fn extract(&self, url: &str, language: &str) -> ArticleRecord {
        if let Err(e) = parse_http_url(url) {
            return self.finish(url, Err(e.into()));
        }

        let attempt = AssertUnwindSafe(self.extractor.extract(url, language))
            .catch_unwind()
            .await;

        let result = match attempt {
            Ok(result) => result,
            Err(panic) => Err(ExtractionError::Internal(panic_message(panic.as_ref()))),
        };

        self.finish(url, result)
    }

    fn finish(&self, url: &str, result: Result<ArticleContent, ExtractionError>) -> ArticleRecord {
        match result {
            Ok(content) => {
                metrics::record_extraction("success");
                tracing::debug!(url = %url, title = %content.title, "Article extracted");
                ArticleRecord::succeeded(url, content)
            }
            Err(e) if e.is_internal() => {
                metrics::record_extraction(FailureKind::Internal.as_str());
                tracing::error!(url = %url, error = %e, "Unexpected extraction fault");
                ArticleRecord::failed(url, FailureKind::Internal, format!("{UNEXPECTED_PREFIX}{e}"))
            }
            Err(e) => {
                metrics::record_extraction(FailureKind::Extraction.as_str());
                tracing::warn!(url = %url, error = %e, "Article extraction failed");
                ArticleRecord::failed(url, FailureKind::Extraction, Error::from(e).to_string())
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "extractor panicked".to_string()
    }
}
