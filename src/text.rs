/// Term pipeline: normalizing a tab into a bag of terms
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{extract_domain, extract_path_terms};
use crate::tab_data::TabInfo;

/// Words too common to say anything about a tab
pub const STOP_WORDS: [&str; 13] = [
    "the", "and", "for", "with", "this", "that", "from", "not", "are", "was", "were", "have", "has",
];

/// Shortest token kept by the tokenizer
pub const MIN_TERM_LEN: usize = 3;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("non-word pattern is valid"));

pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term)
}

/// Lowercase and blank out everything but ASCII word characters and whitespace.
pub fn normalize_words(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// Split text into terms: lowercase, strip punctuation, drop short tokens and stop words
///
/// Token order is preserved and duplicates are kept; term frequency depends on both.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_words(text)
        .split_whitespace()
        .filter(|term| term.chars().count() >= MIN_TERM_LEN)
        .filter(|term| !is_stop_word(term))
        .map(str::to_string)
        .collect()
}

/// One tab seen as a document of the current batch
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord<'a> {
    pub tab: &'a TabInfo,
    pub normalized_text: String,
    pub domain: String,
    pub terms: Vec<String>,
}

impl<'a> DocumentRecord<'a> {
    /// Title, hostname and path terms, lowercased and tokenized together.
    pub fn from_tab(tab: &'a TabInfo) -> DocumentRecord<'a> {
        let domain = extract_domain(&tab.url);
        let normalized_text = format!(
            "{} {} {}",
            tab.title.to_lowercase(),
            domain,
            extract_path_terms(&tab.url)
        );
        let terms = tokenize(&normalized_text);

        DocumentRecord {
            tab,
            normalized_text,
            domain,
            terms,
        }
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Occurrences of `term` divided by the number of terms; 0 for an empty document.
    pub fn term_frequency(&self, term: &str) -> f64 {
        if self.terms.is_empty() {
            return 0.0;
        }
        let occurrences = self.terms.iter().filter(|t| *t == term).count();
        occurrences as f64 / self.terms.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tab(url: &str, title: &str) -> TabInfo {
        TabInfo::new(1, url.to_string(), title.to_string())
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("Rust Programming Language"), vec!["rust", "programming", "language"]);
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        assert_eq!(tokenize("The cat and a dog with fish"), vec!["cat", "dog", "fish"]);
        assert_eq!(tokenize("this that from were have has"), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(tokenize("Breaking: X-files, news!"), vec!["breaking", "files", "news"]);
        assert_eq!(tokenize("snake_case stays"), vec!["snake_case", "stays"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates() {
        assert_eq!(tokenize("foo bar foo"), vec!["foo", "bar", "foo"]);
    }

    #[test]
    fn test_tokenize_non_ascii_becomes_separator() {
        assert_eq!(tokenize("café menu"), vec!["caf", "menu"]);
    }

    #[test]
    fn test_document_from_tab() {
        let tab = create_test_tab("https://www.github.com/foo", "foo repo");
        let doc = DocumentRecord::from_tab(&tab);

        assert_eq!(doc.domain, "github.com");
        assert_eq!(doc.terms, vec!["foo", "repo", "github", "com", "foo"]);
    }

    #[test]
    fn test_document_path_digits_removed() {
        let tab = create_test_tab("https://cnn.com/news1", "Breaking: X");
        let doc = DocumentRecord::from_tab(&tab);

        assert_eq!(doc.terms, vec!["breaking", "cnn", "com", "news"]);
    }

    #[test]
    fn test_document_malformed_url() {
        let tab = create_test_tab("https://", "Lonely title");
        let doc = DocumentRecord::from_tab(&tab);

        assert_eq!(doc.domain, "");
        assert_eq!(doc.terms, vec!["lonely", "title"]);
    }

    #[test]
    fn test_term_frequency() {
        let tab = create_test_tab("https://github.com/foo", "foo repo");
        let doc = DocumentRecord::from_tab(&tab);

        assert!((doc.term_frequency("foo") - 0.4).abs() < 1e-12);
        assert!((doc.term_frequency("github") - 0.2).abs() < 1e-12);
        assert_eq!(doc.term_frequency("missing"), 0.0);
        assert!(doc.contains_term("repo"));
    }

    #[test]
    fn test_term_frequency_empty_document() {
        let tab = create_test_tab("", "");
        let doc = DocumentRecord::from_tab(&tab);

        assert!(doc.terms.is_empty());
        assert_eq!(doc.term_frequency("anything"), 0.0);
    }
}
