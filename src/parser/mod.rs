//! Article extraction: download, parse and enrich a single page
//!
//! [`ArticleExtractor`] is the seam the aggregator talks to;
//! [`HtmlArticleExtractor`] is the production implementation built from the
//! page fetcher, the HTML parser and the keyword/summary pass.

pub mod html;
pub mod nlp;
pub mod sanitize;
pub mod selectors;

// Re-export main parser and public types
pub use html::{parse_date_string, ArticleParser};

use async_trait::async_trait;

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::Session;
use crate::models::ArticleContent;
use crate::utils::error::ExtractionError;

/// Something that turns a URL into structured article fields
///
/// Implementations report download and parse problems as
/// `ExtractionError::Fetch` / `ExtractionError::Parse`; anything else is
/// `ExtractionError::Internal`.
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Extract one article. `language` is a short code such as `"en"`.
    async fn extract(&self, url: &str, language: &str) -> Result<ArticleContent, ExtractionError>;
}

/// Extractor that downloads the page over HTTP and parses it locally
pub struct HtmlArticleExtractor {
    fetcher: PageFetcher,
    parser: ArticleParser,
}

impl HtmlArticleExtractor {
    pub fn new(session: Session) -> Self {
        Self {
            fetcher: PageFetcher::new(session),
            parser: ArticleParser::new(),
        }
    }

    /// Parse an already-downloaded page and fill in keywords and summary
    pub fn extract_from_html(
        &self,
        html: &str,
        page_url: &str,
        language: &str,
    ) -> Result<ArticleContent, ExtractionError> {
        let mut content = self.parser.parse(html, page_url)?;

        content.keywords = nlp::extract_keywords(&content.title, &content.text, language);
        content.summary = nlp::summarize(
            &content.title,
            &content.text,
            language,
            nlp::SUMMARY_SENTENCES,
        );

        Ok(content)
    }
}

#[async_trait]
impl ArticleExtractor for HtmlArticleExtractor {
    async fn extract(&self, url: &str, language: &str) -> Result<ArticleContent, ExtractionError> {
        let page = self.fetcher.fetch_page(url).await?;
        page.ensure_html()?;

        let mut content = self.extract_from_html(&page.body, &page.final_url, language)?;
        if content.canonical_link.is_empty() {
            content.canonical_link = url.to_string();
        }

        tracing::debug!(
            url = %url,
            title = %sanitize::truncate(&content.title, 80),
            chars = content.text.chars().count(),
            "Parsed article"
        );

        Ok(content)
    }
}
