//! Text sanitization utilities for cleaning extracted article content
//!
//! This module provides functions to clean and normalize text extracted from
//! HTML pages, removing unwanted characters, normalizing whitespace, and
//! decoding HTML entities.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns for performance
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static MULTI_NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static BYLINE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(written\s+)?by[:\s]+").unwrap());

/// Sanitize extracted text content
///
/// This function applies multiple cleaning steps:
/// 1. Remove zero-width characters
/// 2. Remove control characters (except newline/tab)
/// 3. Decode HTML entities
/// 4. Normalize whitespace
/// 5. Trim each line
/// 6. Remove excessive blank lines
///
/// # Examples
///
/// ```
/// use newscrawl::parser::sanitize::sanitize_text;
///
/// let dirty = "Hello\u{200B}World  \n\n\n\nTest";
/// let clean = sanitize_text(dirty);
/// assert!(!clean.contains('\u{200B}'));
/// ```
pub fn sanitize_text(text: &str) -> String {
    let mut result = remove_zero_width(text);

    result = remove_control_chars(&result);
    result = decode_html_entities(&result);
    result = normalize_whitespace(&result);
    result = trim_lines(&result);
    result = collapse_newlines(&result);

    result.trim().to_string()
}

/// Sanitize a single-line value such as a title or author name
///
/// Like [`sanitize_text`], but every run of whitespace (newlines included)
/// becomes one space.
pub fn sanitize_inline(text: &str) -> String {
    sanitize_text(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove zero-width spaces and similar invisible characters
///
/// Removes:
/// - \u{200B} Zero-width space
/// - \u{200C} Zero-width non-joiner
/// - \u{200D} Zero-width joiner
/// - \u{200E} Left-to-right mark
/// - \u{200F} Right-to-left mark
/// - \u{2028} Line separator
/// - \u{2029} Paragraph separator
/// - \u{202A}-\u{202F} Various formatting characters
/// - \u{FEFF} Byte order mark (BOM)
///
/// # Examples
///
/// ```
/// use newscrawl::parser::sanitize::remove_zero_width;
///
/// let text = "news\u{200B}room\u{FEFF}";
/// let clean = remove_zero_width(text);
/// assert_eq!(clean, "newsroom");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except newline and tab
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Decode HTML entities to plain text
///
/// Named, decimal and hex entities are decoded; non-breaking spaces become
/// ordinary spaces.
///
/// # Examples
///
/// ```
/// use newscrawl::parser::sanitize::decode_html_entities;
///
/// let text = "&lt;div&gt;Hello &amp; World&lt;/div&gt;";
/// let decoded = decode_html_entities(text);
/// assert_eq!(decoded, "<div>Hello & World</div>");
/// ```
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).replace('\u{00A0}', " ")
}

/// Normalize multiple spaces/tabs to single space
///
/// Does NOT affect newlines - those are handled separately.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}

/// Trim whitespace from each line
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse excessive newlines to maximum of 2
pub fn collapse_newlines(text: &str) -> String {
    MULTI_NEWLINE_REGEX.replace_all(text, "\n\n").to_string()
}

/// Check if text contains meaningful content
///
/// # Examples
///
/// ```
/// use newscrawl::parser::sanitize::has_content;
///
/// assert!(has_content("Hello"));
/// assert!(!has_content("   \n\t  "));
/// ```
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Truncate text to max chars with ellipsis
///
/// # Examples
///
/// ```
/// use newscrawl::parser::sanitize::truncate;
///
/// assert_eq!(truncate("Hello World", 5), "He...");
/// assert_eq!(truncate("Hello World", 20), "Hello World");
/// ```
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Strip a leading "By" from a byline
///
/// # Examples
///
/// ```
/// use newscrawl::parser::sanitize::strip_byline_prefix;
///
/// assert_eq!(strip_byline_prefix("By Jane Doe"), "Jane Doe");
/// assert_eq!(strip_byline_prefix("Byron Smith"), "Byron Smith");
/// ```
pub fn strip_byline_prefix(text: &str) -> String {
    BYLINE_PREFIX_REGEX.replace(text, "").trim().to_string()
}
