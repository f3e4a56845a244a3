use super::Aggregator;
use crate::models::ArticleRecord;

impl Aggregator {
    /// Extract several URLs one after another.
    ///
    /// The output has one record per input URL, in input order. Repeated
    /// URLs are extracted again.
    pub async fn extract_many(&self, urls: &[String], language: &str) -> Vec<ArticleRecord> {
        tracing::info!(count = urls.len(), language = %language, "Batch extraction started");

        let mut records = Vec::with_capacity(urls.len());
        for url in urls {
            records.push(self.extract(url, language).await);
        }

        let succeeded = records.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            count = records.len(),
            succeeded,
            failed = records.len() - succeeded,
            "Batch extraction finished"
        );

        records
    }
}
