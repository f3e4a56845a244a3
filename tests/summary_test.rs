//! Tests for article summaries

mod common;

use common::{aggregator, MockExtractor, MockFeedReader, Script};
use newscrawl::models::{FailureKind, SummaryOutcome};
use newscrawl::ArticleContent;
use std::time::Duration;

const URL: &str = "https://news.example.com/story";

fn summarized(outcome: SummaryOutcome) -> newscrawl::models::SummaryRecord {
    match outcome {
        SummaryOutcome::Summary(summary) => summary,
        SummaryOutcome::Failed(record) => panic!("unexpected failure: {:?}", record.error()),
    }
}

#[tokio::test]
async fn test_fallback_summary_from_body() {
    let extractor = MockExtractor::new().article(URL, "Story", "A. B. C. D.");
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let summary = summarized(agg.summarize(URL, 2).await);

    assert_eq!(summary.url, URL);
    assert_eq!(summary.title, "Story");
    assert_eq!(summary.summary, "A. B.");
    assert!(summary.success);
}

#[tokio::test]
async fn test_extractor_summary_takes_precedence() {
    let extractor = MockExtractor::new().with(
        URL,
        Script::Article(ArticleContent {
            title: "Story".into(),
            text: "First. Second. Third.".into(),
            summary: "Concise extractor summary.".into(),
            ..Default::default()
        }),
    );
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let summary = summarized(agg.summarize(URL, 1).await);
    assert_eq!(summary.summary, "Concise extractor summary.");
}

#[tokio::test]
async fn test_keywords_are_capped() {
    let keywords: Vec<String> = (0..15).map(|i| format!("kw{i}")).collect();
    let extractor = MockExtractor::new().with(
        URL,
        Script::Article(ArticleContent {
            title: "Story".into(),
            text: "Body.".into(),
            keywords: keywords.clone(),
            authors: vec!["Jane Doe".into()],
            top_image: "https://news.example.com/lead.jpg".into(),
            ..Default::default()
        }),
    );
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let summary = summarized(agg.summarize(URL, 3).await);

    assert_eq!(summary.keywords, keywords[..10].to_vec());
    assert_eq!(summary.authors, vec!["Jane Doe"]);
    assert_eq!(summary.top_image, "https://news.example.com/lead.jpg");
}

#[tokio::test]
async fn test_fallback_longer_than_body_appends_period() {
    let extractor = MockExtractor::new().article(URL, "Story", "A. B.");
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let summary = summarized(agg.summarize(URL, 5).await);
    assert_eq!(summary.summary, "A. B..");
}

#[tokio::test]
async fn test_fallback_for_title_only_page() {
    let extractor = MockExtractor::new().article(URL, "Story", "");
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let summary = summarized(agg.summarize(URL, 5).await);
    assert_eq!(summary.summary, ".");
}

#[tokio::test]
async fn test_non_positive_length_gives_empty_summary() {
    let extractor = MockExtractor::new().article(URL, "Story", "A. B. C.");
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    assert_eq!(summarized(agg.summarize(URL, 0).await).summary, "");
    assert_eq!(summarized(agg.summarize(URL, -2).await).summary, "");
}

#[tokio::test]
async fn test_failed_extraction_is_returned_unchanged() {
    let extractor = MockExtractor::new().with(URL, Script::Status(404));
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let direct = agg.extract(URL, "en").await;
    let outcome = agg.summarize(URL, 5).await;

    assert!(!outcome.is_success());
    match outcome {
        SummaryOutcome::Failed(record) => {
            assert_eq!(record, direct);
            assert_eq!(record.failure_kind(), Some(FailureKind::Extraction));
        }
        SummaryOutcome::Summary(_) => panic!("expected failure"),
    }
}

#[tokio::test]
async fn test_summary_serializes_expected_fields() {
    let extractor = MockExtractor::new().article(URL, "Story", "One. Two.");
    let (agg, _, _) = aggregator(extractor, MockFeedReader::new(), Duration::ZERO);

    let json = serde_json::to_value(agg.summarize(URL, 1).await).unwrap();
    let obj = json.as_object().unwrap();

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["authors", "keywords", "publish_date", "success", "summary", "title", "top_image", "url"]
    );
    assert_eq!(json["summary"], "One.");
}
