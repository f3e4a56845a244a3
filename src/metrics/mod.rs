//! Prometheus metrics for the aggregation pipeline
//!
//! This module provides metrics tracking for:
//! - Extraction: outcomes per article (success / extraction / internal failure)
//! - Feeds: feed-level failures by kind
//! - Tools: calls by tool name and status, call duration
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all aggregation metrics
struct AggregatorMetrics {
    extractions: CounterVec,
    feed_errors: CounterVec,
    tool_calls: CounterVec,
    tool_duration: HistogramVec,
}

/// Global storage; `None` when registration failed
static METRICS: OnceLock<Option<AggregatorMetrics>> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

fn register() -> Result<AggregatorMetrics, prometheus::Error> {
    Ok(AggregatorMetrics {
        extractions: register_counter_vec!(
            "newscrawl_extractions_total",
            "Total article extractions by outcome",
            &["outcome"]
        )?,
        feed_errors: register_counter_vec!(
            "newscrawl_feed_errors_total",
            "Total feeds that could not be read or were empty",
            &["kind"]
        )?,
        tool_calls: register_counter_vec!(
            "newscrawl_tool_calls_total",
            "Total tool invocations by tool and status",
            &["tool", "status"]
        )?,
        tool_duration: register_histogram_vec!(
            "newscrawl_tool_call_duration_seconds",
            "Tool invocation duration in seconds",
            &["tool"],
            vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
        )?,
    })
}

/// Initialize all Prometheus metrics
///
/// Safe to call more than once; only the first call registers.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = newscrawl::metrics::init_metrics() {
///     tracing::warn!(error = %e, "Metrics initialization failed");
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    let metrics = METRICS.get_or_init(|| match register() {
        Ok(metrics) => {
            tracing::info!("Prometheus metrics initialized successfully");
            Some(metrics)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus metrics registration failed");
            None
        }
    });

    if metrics.is_some() {
        Ok(())
    } else {
        Err("Prometheus metrics registration failed".into())
    }
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    matches!(METRICS.get(), Some(Some(_)))
}

fn metrics() -> Option<&'static AggregatorMetrics> {
    METRICS.get().and_then(Option::as_ref)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record one extraction outcome (`success`, `extraction_failure`, `internal_failure`)
pub fn record_extraction(outcome: &str) {
    if let Some(m) = metrics() {
        m.extractions.with_label_values(&[outcome]).inc();
    }
}

/// Record a feed that produced no articles
pub fn record_feed_error(kind: &str) {
    if let Some(m) = metrics() {
        m.feed_errors.with_label_values(&[kind]).inc();
    }
}

/// Record a tool call
pub fn record_tool_call(tool: &str, success: bool, duration_secs: f64) {
    let Some(m) = metrics() else {
        return;
    };

    let status = if success { "success" } else { "error" };
    m.tool_calls.with_label_values(&[tool, status]).inc();
    m.tool_duration
        .with_label_values(&[tool])
        .observe(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ensure_metrics_initialized() {
        let _ = init_metrics();
    }

    #[test]
    fn test_init_metrics_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
        assert!(metrics_initialized());
    }

    #[test]
    fn test_gather_metrics() {
        ensure_metrics_initialized();
        record_extraction("success");
        record_feed_error("no_entries");
        record_tool_call("crawl_news_article", true, 0.2);

        let text = gather_metrics().unwrap();
        assert!(text.contains("newscrawl_extractions_total"));
        assert!(text.contains("newscrawl_tool_calls_total"));
    }

    #[test]
    fn test_recording_never_panics() {
        record_extraction("internal_failure");
        record_feed_error("parse");
        record_tool_call("unknown", false, 0.0);
    }
}
