//! CSS selectors for generic news article pages
//!
//! Selector lists are tried in order; the first one yielding usable content
//! wins. Most news sites expose OpenGraph/`article:*` metadata, so meta tags
//! come first and structural markup is the fallback.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Title
    static ref TITLE_META: Vec<Selector> = vec![
        parse_selector!("meta[property='og:title']"),
        parse_selector!("meta[name='twitter:title']"),
    ];

    static ref TITLE_TEXT: Vec<Selector> = vec![
        parse_selector!("title"),
        parse_selector!("h1"),
    ];

    // Body containers, best candidates first
    static ref CONTENT: Vec<Selector> = vec![
        parse_selector!("[itemprop='articleBody']"),
        parse_selector!("article"),
        parse_selector!("[role='main']"),
        parse_selector!("main"),
        parse_selector!("div[class*='article-body']"),
        parse_selector!("div[class*='story-body']"),
        parse_selector!("div[class*='post-content']"),
        parse_selector!("div[class*='entry-content']"),
        parse_selector!("#content"),
    ];

    static ref PARAGRAPH: Selector = parse_selector!("p");

    // Authors
    static ref AUTHOR_META: Vec<Selector> = vec![
        parse_selector!("meta[name='author']"),
        parse_selector!("meta[property='article:author']"),
        parse_selector!("meta[name='byl']"),
    ];

    static ref AUTHOR_TEXT: Vec<Selector> = vec![
        parse_selector!("[rel='author']"),
        parse_selector!("[itemprop='author'] [itemprop='name']"),
        parse_selector!(".byline"),
        parse_selector!(".author"),
    ];

    // Publish date
    static ref DATE_META: Vec<Selector> = vec![
        parse_selector!("meta[property='article:published_time']"),
        parse_selector!("meta[name='pubdate']"),
        parse_selector!("meta[name='publishdate']"),
        parse_selector!("meta[itemprop='datePublished']"),
        parse_selector!("meta[name='date']"),
        parse_selector!("meta[name='dc.date']"),
    ];

    static ref DATE_TIME: Selector = parse_selector!("time[datetime]");

    // Images and media
    static ref TOP_IMAGE_META: Vec<Selector> = vec![
        parse_selector!("meta[property='og:image']"),
        parse_selector!("meta[name='twitter:image']"),
        parse_selector!("link[rel='image_src']"),
    ];

    static ref IMAGE: Selector = parse_selector!("img[src]");

    static ref MOVIE: Selector = parse_selector!("iframe[src], embed[src], video[src], video source[src]");

    // Page metadata
    static ref DESCRIPTION_META: Vec<Selector> = vec![
        parse_selector!("meta[name='description']"),
        parse_selector!("meta[property='og:description']"),
    ];

    static ref LANG_META: Vec<Selector> = vec![
        parse_selector!("meta[http-equiv='content-language']"),
        parse_selector!("meta[name='lang']"),
        parse_selector!("meta[property='og:locale']"),
    ];

    static ref HTML_ROOT: Selector = parse_selector!("html[lang]");

    static ref FAVICON: Selector = parse_selector!("link[rel~='icon']");

    static ref KEYWORDS_META: Selector = parse_selector!("meta[name='keywords']");

    static ref CANONICAL: Vec<Selector> = vec![
        parse_selector!("link[rel='canonical']"),
        parse_selector!("meta[property='og:url']"),
    ];

    // Noise selectors - elements whose text never belongs to the body
    static ref NOISE_ELEMENTS: Vec<Selector> = {
        let selectors = vec![
            "script",
            "style",
            "noscript",
            "iframe",
            "figure figcaption", // Image captions
            "aside",             // Related links, pull quotes
            "nav",
            "footer",
            "form",
            "[class*='newsletter']",
            "[class*='related']",
            "[class*='share']",
            "[class*='advert']",
        ];

        selectors
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .collect()
    };
}

/// Selectors for article content and metadata
pub struct ArticleSelectors {
    pub title_meta: &'static [Selector],
    pub title_text: &'static [Selector],
    pub content: &'static [Selector],
    pub paragraph: &'static Selector,
    pub author_meta: &'static [Selector],
    pub author_text: &'static [Selector],
    pub date_meta: &'static [Selector],
    pub date_time: &'static Selector,
}

impl ArticleSelectors {
    pub fn new() -> Self {
        Self {
            title_meta: &TITLE_META,
            title_text: &TITLE_TEXT,
            content: &CONTENT,
            paragraph: &PARAGRAPH,
            author_meta: &AUTHOR_META,
            author_text: &AUTHOR_TEXT,
            date_meta: &DATE_META,
            date_time: &DATE_TIME,
        }
    }
}

impl Default for ArticleSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for images, embedded media and page-level metadata
pub struct MetaSelectors {
    pub top_image: &'static [Selector],
    pub image: &'static Selector,
    pub movie: &'static Selector,
    pub description: &'static [Selector],
    pub lang: &'static [Selector],
    pub html_root: &'static Selector,
    pub favicon: &'static Selector,
    pub keywords: &'static Selector,
    pub canonical: &'static [Selector],
}

impl MetaSelectors {
    pub fn new() -> Self {
        Self {
            top_image: &TOP_IMAGE_META,
            image: &IMAGE,
            movie: &MOVIE,
            description: &DESCRIPTION_META,
            lang: &LANG_META,
            html_root: &HTML_ROOT,
            favicon: &FAVICON,
            keywords: &KEYWORDS_META,
            canonical: &CANONICAL,
        }
    }
}

impl Default for MetaSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for noise elements to remove during parsing
pub struct NoiseSelectors {
    pub elements: &'static [Selector],
}

impl NoiseSelectors {
    pub fn new() -> Self {
        Self {
            elements: &NOISE_ELEMENTS,
        }
    }
}

impl Default for NoiseSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Hosts whose embeds are reported as movies
pub const VIDEO_HOSTS: &[&str] = &[
    "youtube.com",
    "youtube-nocookie.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
    "player.twitch.tv",
    "facebook.com",
    "jwplayer.com",
    "brightcove.net",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_selectors_creation() {
        let selectors = ArticleSelectors::new();
        assert!(!selectors.title_meta.is_empty());
        assert!(!selectors.content.is_empty());
        assert!(!selectors.author_meta.is_empty());
        assert!(!selectors.date_meta.is_empty());
    }

    #[test]
    fn test_meta_selectors_default() {
        let selectors = MetaSelectors::default();
        assert_eq!(selectors.canonical.len(), 2);
        assert!(!selectors.top_image.is_empty());
    }

    #[test]
    fn test_noise_selectors() {
        let noise = NoiseSelectors::new();
        assert!(noise.elements.len() >= 10);
    }
}
