//! HTML article parser
//!
//! Turns a downloaded page into [`ArticleContent`]: title, body text,
//! authors, publish date, images, embedded media and page metadata.
//! Keywords and the summary are filled in later by the extractor.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::models::ArticleContent;
use crate::parser::sanitize::{has_content, sanitize_inline, sanitize_text, strip_byline_prefix};
use crate::parser::selectors::{ArticleSelectors, MetaSelectors, NoiseSelectors, VIDEO_HOSTS};
use crate::utils::error::ParseError;

/// Images narrower than this are not considered for the top image
const MIN_TOP_IMAGE_WIDTH: u32 = 300;

/// Author values longer than this are page furniture, not names
const MAX_AUTHOR_CHARS: usize = 80;

/// Generic news article parser
pub struct ArticleParser {
    article: ArticleSelectors,
    meta: MetaSelectors,
    noise: NoiseSelectors,
}

impl ArticleParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            article: ArticleSelectors::new(),
            meta: MetaSelectors::new(),
            noise: NoiseSelectors::new(),
        }
    }

    /// Parse an HTML document fetched from `page_url`.
    ///
    /// Relative links are resolved against `page_url`. `canonical_link` is
    /// left empty when the page declares none.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::EmptyDocument` for a blank page and
    /// `ParseError::ContentNotFound` when neither a title nor any body text
    /// is present.
    pub fn parse(&self, html: &str, page_url: &str) -> Result<ArticleContent, ParseError> {
        if !has_content(html) {
            return Err(ParseError::EmptyDocument);
        }

        let document = Html::parse_document(html);
        let base = Url::parse(page_url).ok();

        let title = self.extract_title(&document);
        let text = self.extract_body(&document);

        if title.is_empty() && text.is_empty() {
            return Err(ParseError::ContentNotFound);
        }

        let images = self.extract_images(&document, base.as_ref());
        let top_image = self
            .extract_top_image(&document, base.as_ref())
            .unwrap_or_default();

        Ok(ArticleContent {
            title,
            text,
            authors: self.extract_authors(&document),
            publish_date: self.extract_publish_date(&document),
            top_image,
            images,
            movies: self.extract_movies(&document, base.as_ref()),
            meta_description: first_meta_content(&document, self.meta.description)
                .map(|d| sanitize_inline(&d))
                .unwrap_or_default(),
            meta_lang: self.extract_lang(&document),
            meta_favicon: document
                .select(self.meta.favicon)
                .filter_map(|el| el.value().attr("href"))
                .find_map(|href| resolve_url(base.as_ref(), href))
                .unwrap_or_default(),
            meta_keywords: self.extract_meta_keywords(&document),
            canonical_link: self
                .extract_canonical(&document, base.as_ref())
                .unwrap_or_default(),
            ..Default::default()
        })
    }

    fn extract_title(&self, document: &Html) -> String {
        if let Some(title) = first_meta_content(document, self.article.title_meta) {
            return sanitize_inline(&title);
        }

        self.extract_first_match(document, self.article.title_text)
            .map(|t| sanitize_inline(&t))
            .unwrap_or_default()
    }

    /// Body text from the container with the most paragraph text, falling
    /// back to every paragraph in the document.
    fn extract_body(&self, document: &Html) -> String {
        let mut best: Option<Vec<String>> = None;
        let mut best_len = 0;

        for selector in self.article.content {
            for container in document.select(selector) {
                let paragraphs = self.collect_paragraphs(container);
                let len: usize = paragraphs.iter().map(String::len).sum();
                if len > best_len {
                    best_len = len;
                    best = Some(paragraphs);
                }
            }
        }

        let paragraphs = match best {
            Some(paragraphs) => paragraphs,
            None => self.collect_paragraphs(document.root_element()),
        };

        sanitize_text(&paragraphs.join("\n\n"))
    }

    /// Non-empty paragraph texts under `root`, skipping noise subtrees
    fn collect_paragraphs(&self, root: ElementRef<'_>) -> Vec<String> {
        root.select(self.article.paragraph)
            .filter(|p| !self.is_noise(*p))
            .map(|p| sanitize_inline(&p.text().collect::<String>()))
            .filter(|t| has_content(t))
            .collect()
    }

    fn is_noise(&self, element: ElementRef<'_>) -> bool {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.noise.elements.iter().any(|s| s.matches(&ancestor)))
    }

    fn extract_authors(&self, document: &Html) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();

        for selector in self.article.author_meta {
            for el in document.select(selector) {
                if let Some(content) = el.value().attr("content") {
                    candidates.push(content.to_string());
                }
            }
        }

        for selector in self.article.author_text {
            for el in document.select(selector) {
                candidates.push(el.text().collect::<String>());
            }
        }

        let mut seen = HashSet::new();
        candidates
            .iter()
            .flat_map(|raw| split_author_list(raw))
            .filter(|name| {
                has_content(name)
                    && !name.starts_with("http")
                    && name.chars().count() <= MAX_AUTHOR_CHARS
            })
            .filter(|name| seen.insert(name.to_lowercase()))
            .collect()
    }

    fn extract_publish_date(&self, document: &Html) -> Option<DateTime<Utc>> {
        first_meta_content(document, self.article.date_meta)
            .and_then(|d| parse_date_string(&d))
            .or_else(|| {
                document
                    .select(self.article.date_time)
                    .filter_map(|el| el.value().attr("datetime"))
                    .find_map(parse_date_string)
            })
    }

    /// All image URLs, absolute and deduplicated, in document order
    fn extract_images(&self, document: &Html, base: Option<&Url>) -> Vec<String> {
        let mut seen = HashSet::new();
        document
            .select(self.meta.image)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| resolve_url(base, src))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Declared share image, else the first large image, else the first image
    fn extract_top_image(&self, document: &Html, base: Option<&Url>) -> Option<String> {
        for selector in self.meta.top_image {
            for el in document.select(selector) {
                let value = el.value().attr("content").or_else(|| el.value().attr("href"));
                if let Some(url) = value.and_then(|v| resolve_url(base, v)) {
                    return Some(url);
                }
            }
        }

        let images: Vec<ElementRef<'_>> = document.select(self.meta.image).collect();
        let large = images.iter().find(|img| {
            img.value()
                .attr("width")
                .and_then(|w| w.trim_end_matches("px").parse::<u32>().ok())
                .is_some_and(|w| w >= MIN_TOP_IMAGE_WIDTH)
        });

        large
            .or_else(|| images.first())
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| resolve_url(base, src))
    }

    /// Embedded video sources hosted on known video platforms
    fn extract_movies(&self, document: &Html, base: Option<&Url>) -> Vec<String> {
        let mut seen = HashSet::new();
        document
            .select(self.meta.movie)
            .filter_map(|el| {
                let src = el.value().attr("src")?;
                let url = resolve_url(base, src)?;
                let is_native = matches!(el.value().name(), "video" | "source");
                (is_native || is_video_host(&url)).then_some(url)
            })
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    fn extract_lang(&self, document: &Html) -> String {
        let raw = document
            .select(self.meta.html_root)
            .filter_map(|el| el.value().attr("lang"))
            .find(|lang| has_content(lang))
            .map(str::to_string)
            .or_else(|| first_meta_content(document, self.meta.lang));

        raw.map(|lang| primary_language(&lang)).unwrap_or_default()
    }

    fn extract_meta_keywords(&self, document: &Html) -> Vec<String> {
        document
            .select(self.meta.keywords)
            .filter_map(|el| el.value().attr("content"))
            .flat_map(|content| content.split(','))
            .map(sanitize_inline)
            .filter(|k| has_content(k))
            .collect()
    }

    fn extract_canonical(&self, document: &Html, base: Option<&Url>) -> Option<String> {
        self.meta.canonical.iter().find_map(|selector| {
            document.select(selector).find_map(|el| {
                let value = el.value().attr("href").or_else(|| el.value().attr("content"))?;
                resolve_url(base, value)
            })
        })
    }

    /// Extract first matching text from list of selectors
    fn extract_first_match(&self, document: &Html, selectors: &[Selector]) -> Option<String> {
        for selector in selectors {
            if let Some(element) = document.select(selector).next() {
                let text = element.text().collect::<String>();
                if has_content(&text) {
                    return Some(text);
                }
            }
        }
        None
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `content` attribute of the first matching meta tag that has one
fn first_meta_content(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|el| el.value().attr("content"))
            .find(|c| has_content(c))
            .map(str::to_string)
    })
}

/// Resolve `href` against `base`, dropping inline and script URLs
fn resolve_url(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with("data:") || href.starts_with("javascript:") {
        return None;
    }

    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };

    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

fn is_video_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .is_some_and(|host| {
            VIDEO_HOSTS
                .iter()
                .any(|known| host == *known || host.ends_with(&format!(".{known}")))
        })
}

/// "Jane Doe and John Roe, Staff" style bylines into individual names
fn split_author_list(raw: &str) -> Vec<String> {
    let cleaned = strip_byline_prefix(&sanitize_inline(raw));
    cleaned
        .split([',', '|', ';'])
        .flat_map(|part| part.split(" and "))
        .map(|name| strip_byline_prefix(name.trim()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// `en-US` / `en_GB` to `en`
fn primary_language(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Parse a date string in any of the formats commonly found in article
/// metadata.
pub fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let clean_date = date_str.trim();
    if clean_date.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(clean_date) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(clean_date) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z", "%Y-%m-%d %H:%M:%S %z"];
    for format in &offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(clean_date, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // 2024-12-15T14:30:00.000
        "%Y-%m-%dT%H:%M:%S",    // 2024-12-15T14:30:00
        "%Y-%m-%d %H:%M:%S",    // 2024-12-15 14:30:00
        "%Y-%m-%d %H:%M",       // 2024-12-15 14:30
        "%Y/%m/%d %H:%M:%S",    // 2024/12/15 14:30:00
    ];
    for format in &naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(clean_date, format) {
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for format in &date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(clean_date, format) {
            let dt = date.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    None
}
