//! Keyword and summary extraction over plain article text
//!
//! Frequency based: keywords are the most frequent non-stopword terms of the
//! title and body, and the summary is the best-scoring sentences of the body
//! emitted in their original order.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Maximum number of keywords produced per article
pub const MAX_KEYWORDS: usize = 10;

/// Number of sentences in an auto-generated summary
pub const SUMMARY_SENTENCES: usize = 5;

/// Words shorter than this are never keywords
const MIN_WORD_CHARS: usize = 3;

static ENGLISH_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "didn't", "do", "does", "doesn't",
        "doing", "don't", "down", "during", "each", "even", "few", "for", "from", "further",
        "had", "has", "hasn't", "have", "haven't", "having", "he", "her", "here", "hers",
        "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is",
        "isn't", "it", "it's", "its", "itself", "just", "last", "like", "many", "may", "me",
        "more", "most", "much", "must", "my", "myself", "new", "no", "nor", "not", "now", "of",
        "off", "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out",
        "over", "own", "said", "same", "say", "says", "she", "should", "since", "so", "some",
        "still", "such", "than", "that", "that's", "the", "their", "theirs", "them",
        "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
        "two", "under", "until", "up", "very", "was", "wasn't", "we", "were", "weren't", "what",
        "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won't",
        "would", "year", "years", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lowercased word tokens of `text`, in order
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '’').to_lowercase())
        .filter(|w| !w.is_empty())
}

fn is_candidate(word: &str, language: &str) -> bool {
    if word.chars().count() < MIN_WORD_CHARS {
        return false;
    }
    if word.chars().all(|c| c.is_numeric()) {
        return false;
    }
    !(language.eq_ignore_ascii_case("en") && ENGLISH_STOPWORDS.contains(word))
}

/// Candidate term frequencies with the index of each term's first occurrence
fn term_frequencies(title: &str, text: &str, language: &str) -> HashMap<String, (usize, usize)> {
    let mut freqs: HashMap<String, (usize, usize)> = HashMap::new();
    let tokens = tokenize(title).chain(tokenize(text));

    for (position, word) in tokens.enumerate() {
        if !is_candidate(&word, language) {
            continue;
        }
        freqs
            .entry(word)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    freqs
}

/// Top keywords of an article.
///
/// Ranked by frequency over title and body; ties go to the word seen first.
/// Stopwords are removed when `language` is `"en"`.
pub fn extract_keywords(title: &str, text: &str, language: &str) -> Vec<String> {
    let mut ranked: Vec<(String, (usize, usize))> =
        term_frequencies(title, text, language).into_iter().collect();
    ranked.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

/// Split text into sentences on `.`, `!` or `?` followed by whitespace
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().map_or(true, |next| next.is_whitespace());
        if at_boundary {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

/// Extractive summary of up to `max_sentences` sentences.
///
/// Each sentence is scored on keyword density, overlap with the title and
/// position in the text. The best ones are joined with a space in their
/// original order.
pub fn summarize(title: &str, text: &str, language: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || max_sentences == 0 {
        return String::new();
    }

    let keywords: HashMap<String, usize> = {
        let mut ranked: Vec<(String, (usize, usize))> =
            term_frequencies(title, text, language).into_iter().collect();
        ranked.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));
        ranked
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|(word, (count, _))| (word, count))
            .collect()
    };
    let keyword_total: usize = keywords.values().sum::<usize>().max(1);

    let title_words: HashSet<String> = tokenize(title)
        .filter(|w| is_candidate(w, language))
        .collect();

    let total = sentences.len() as f64;
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let words: Vec<String> = tokenize(sentence).collect();
            if words.is_empty() {
                return (index, 0.0);
            }

            let keyword_hits: usize = words.iter().filter_map(|w| keywords.get(w)).sum();
            let density = keyword_hits as f64 / keyword_total as f64;

            let title_overlap = if title_words.is_empty() {
                0.0
            } else {
                let hits = words.iter().filter(|w| title_words.contains(*w)).count();
                hits as f64 / title_words.len() as f64
            };

            let position = 1.0 - (index as f64 / total);

            (index, density * 2.0 + title_overlap * 1.5 + position)
        })
        .collect();

    scored.sort_by(|(ia, sa), (ib, sb)| sb.total_cmp(sa).then(ia.cmp(ib)));
    let mut chosen: Vec<usize> = scored
        .into_iter()
        .take(max_sentences)
        .map(|(index, _)| index)
        .collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|index| sentences[index].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
