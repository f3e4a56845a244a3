//! Article summaries

use super::Aggregator;
use crate::models::{SummaryOutcome, SummaryRecord};
use crate::parser::nlp::MAX_KEYWORDS;

/// Fragment separator used by the fallback summary
const FRAGMENT_SEPARATOR: &str = ". ";

impl Aggregator {
    /// Condensed view of one article.
    ///
    /// Uses the extractor's summary when it has one, otherwise the first
    /// `summary_length` fragments of the body (see [`fallback_summary`]).
    /// A failed extraction is returned unchanged.
    pub async fn summarize(&self, url: &str, summary_length: i64) -> SummaryOutcome {
        let record = self.extract(url, &self.settings.default_language).await;

        let Some(content) = record.content().filter(|_| record.is_success()) else {
            return SummaryOutcome::Failed(record);
        };

        let summary = if content.summary.is_empty() {
            fallback_summary(&content.text, summary_length)
        } else {
            content.summary.clone()
        };

        SummaryOutcome::Summary(SummaryRecord {
            url: record.url().to_string(),
            title: content.title.clone(),
            summary,
            keywords: content.keywords.iter().take(MAX_KEYWORDS).cloned().collect(),
            authors: content.authors.clone(),
            publish_date: content.publish_date,
            top_image: content.top_image.clone(),
            success: true,
        })
    }
}

/// First `n` fragments of `text` split on `". "`, rejoined with `". "` and
/// terminated with a period.
///
/// A non-positive `n` gives `""`. The period is always appended, so a kept
/// fragment that already ends in `.` yields `..`, and empty text yields `"."`.
///
/// ```
/// use newscrawl::aggregator::fallback_summary;
///
/// assert_eq!(fallback_summary("A. B. C. D.", 2), "A. B.");
/// ```
pub fn fallback_summary(text: &str, n: i64) -> String {
    if n <= 0 {
        return String::new();
    }

    let take = usize::try_from(n).unwrap_or(usize::MAX);
    let joined = text
        .split(FRAGMENT_SEPARATOR)
        .take(take)
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR);

    format!("{joined}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_takes_leading_fragments() {
        assert_eq!(fallback_summary("A. B. C. D.", 2), "A. B.");
        assert_eq!(fallback_summary("A. B. C. D.", 1), "A.");
    }

    #[test]
    fn test_fallback_always_appends_period() {
        assert_eq!(fallback_summary("A. B.", 5), "A. B..");
        assert_eq!(fallback_summary("No period at all", 3), "No period at all.");
    }

    #[test]
    fn test_fallback_non_positive_length() {
        assert_eq!(fallback_summary("A. B.", 0), "");
        assert_eq!(fallback_summary("A. B.", -3), "");
    }

    #[test]
    fn test_fallback_empty_text() {
        assert_eq!(fallback_summary("", 5), ".");
    }
}
