//! Tests for single and batch extraction through the aggregator

mod common;

use common::{aggregator, urls, MockExtractor, MockFeedReader, Script};
use newscrawl::models::FailureKind;
use std::time::Duration;

#[tokio::test]
async fn test_extract_success_populates_record() {
    let extractor = MockExtractor::new().article(
        "https://news.example.com/a",
        "Rust hits 2.0",
        "The Rust team announced a release.",
    );
    let (agg, mock, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let record = agg.extract("https://news.example.com/a", "en").await;

    assert!(record.is_success());
    assert_eq!(record.url(), "https://news.example.com/a");
    assert_eq!(record.title(), "Rust hits 2.0");
    assert!(record.error().is_none());
    assert_eq!(mock.languages(), vec!["en"]);
}

#[tokio::test]
async fn test_timeout_is_extraction_failure() {
    let extractor = MockExtractor::new().with("https://slow.example/a", Script::Timeout);
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let record = agg.extract("https://slow.example/a", "en").await;

    assert!(!record.is_success());
    assert!(record.content().is_none());
    assert_eq!(record.failure_kind(), Some(FailureKind::Extraction));
    assert_eq!(record.error(), Some("Extraction error: Request timeout"));
}

#[tokio::test]
async fn test_parse_failure_is_extraction_failure() {
    let extractor = MockExtractor::new().with("https://empty.example/a", Script::NoContent);
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let record = agg.extract("https://empty.example/a", "en").await;

    assert_eq!(record.failure_kind(), Some(FailureKind::Extraction));
    assert!(record.error().unwrap().starts_with("Extraction error: "));
}

#[tokio::test]
async fn test_internal_fault_is_internal_failure() {
    let extractor = MockExtractor::new().with(
        "https://bug.example/a",
        Script::Internal("index out of range".to_string()),
    );
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let record = agg.extract("https://bug.example/a", "en").await;

    assert_eq!(record.failure_kind(), Some(FailureKind::Internal));
    assert_eq!(record.error(), Some("Unexpected error: index out of range"));
}

#[tokio::test]
async fn test_panicking_extractor_is_contained() {
    let extractor = MockExtractor::new().with(
        "https://panic.example/a",
        Script::Panic("extractor exploded".to_string()),
    );
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let record = agg.extract("https://panic.example/a", "en").await;

    assert!(!record.is_success());
    assert_eq!(record.failure_kind(), Some(FailureKind::Internal));
    assert_eq!(record.error(), Some("Unexpected error: extractor exploded"));
}

#[tokio::test]
async fn test_malformed_url_never_reaches_extractor() {
    let (agg, mock, _) = aggregator(MockExtractor::new(), MockFeedReader::new(), Duration::ZERO);

    for bad in ["", "not a url", "ftp://files.example/a"] {
        let record = agg.extract(bad, "en").await;
        assert!(!record.is_success());
        assert_eq!(record.failure_kind(), Some(FailureKind::Extraction));
        assert!(record.error().unwrap().starts_with("Extraction error: Invalid URL"));
    }

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_batch_preserves_order_and_length() {
    let input = urls(&[
        "https://a.example/1",
        "https://b.example/2",
        "https://c.example/3",
    ]);
    let (agg, mock, _) = aggregator(MockExtractor::new(), MockFeedReader::new(), Duration::ZERO);

    let records = agg.extract_many(&input, "de").await;

    let returned: Vec<&str> = records.iter().map(|r| r.url()).collect();
    assert_eq!(returned, vec!["https://a.example/1", "https://b.example/2", "https://c.example/3"]);
    assert_eq!(mock.calls(), input);
    assert!(mock.languages().iter().all(|l| l == "de"));
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let input = urls(&[
        "https://a.example/1",
        "definitely not a url",
        "https://c.example/3",
        "https://d.example/4",
    ]);
    let extractor = MockExtractor::new().with("https://d.example/4", Script::Panic("boom".into()));
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let records = agg.extract_many(&input, "en").await;

    assert_eq!(records.len(), 4);
    let flags: Vec<bool> = records.iter().map(|r| r.is_success()).collect();
    assert_eq!(flags, vec![true, false, true, false]);
    assert_eq!(records[1].url(), "definitely not a url");
    assert_eq!(records[3].failure_kind(), Some(FailureKind::Internal));
}

#[tokio::test]
async fn test_batch_keeps_duplicates() {
    let input = urls(&["https://a.example/1", "https://a.example/1"]);
    let (agg, mock, _) = aggregator(MockExtractor::new(), MockFeedReader::new(), Duration::ZERO);

    let records = agg.extract_many(&input, "en").await;

    assert_eq!(records.len(), 2);
    assert_eq!(mock.calls().len(), 2);
}

#[tokio::test]
async fn test_batch_empty_input() {
    let (agg, _, _) = aggregator(MockExtractor::new(), MockFeedReader::new(), Duration::ZERO);
    assert!(agg.extract_many(&[], "en").await.is_empty());
}
