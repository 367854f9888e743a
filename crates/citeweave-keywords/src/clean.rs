//! Keyword cleaning applied before reference fetching.
//!
//! Extracted phrases are noisy for use as search terms; this pass strips
//! punctuation, drops stopwords and very short words, keeps only 2-4 word
//! phrases, and dedupes while preserving rank order.

use regex::Regex;
use std::sync::OnceLock;

use crate::stopwords::is_stopword;

/// Cap on cleaned search terms per fetch.
pub const MAX_SEARCH_TERMS: usize = 5;

fn punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[[:punct:]]").unwrap())
}

/// Clean and filter a ranked keyword list into search terms.
pub fn clean_keywords(keywords: &[String]) -> Vec<String> {
    let mut cleaned = Vec::new();
    for kw in keywords {
        let stripped = punct_re().replace_all(kw, "");
        let words: Vec<&str> = stripped
            .split_whitespace()
            .filter(|w| w.len() > 2 && !is_stopword(&w.to_lowercase()))
            .collect();
        if words.len() > 1 && words.len() <= 4 {
            cleaned.push(words.join(" ").to_lowercase());
        }
    }

    let mut seen = std::collections::HashSet::new();
    cleaned.retain(|kw| seen.insert(kw.clone()));
    cleaned.truncate(MAX_SEARCH_TERMS);
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_words_dropped() {
        let cleaned = clean_keywords(&owned(&["learning", "deep learning"]));
        assert_eq!(cleaned, vec!["deep learning"]);
    }

    #[test]
    fn test_punctuation_and_stopwords_stripped() {
        let cleaned = clean_keywords(&owned(&["state-of-the-art neural networks!"]));
        // "the" and short fragments are filtered; hyphens removed
        assert_eq!(cleaned, vec!["stateoftheart neural networks"]);
    }

    #[test]
    fn test_long_phrases_dropped() {
        let cleaned = clean_keywords(&owned(&[
            "one two three four five six seven variables interacting strongly together always",
        ]));
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence() {
        let cleaned = clean_keywords(&owned(&[
            "graph neural networks",
            "Graph Neural Networks",
        ]));
        assert_eq!(cleaned, vec!["graph neural networks"]);
    }

    #[test]
    fn test_cap_at_five() {
        let inputs = owned(&[
            "alpha beta one", "gamma delta two", "epsilon zeta three",
            "eta theta four", "iota kappa five", "lambda sigma six",
        ]);
        assert_eq!(clean_keywords(&inputs).len(), MAX_SEARCH_TERMS);
    }
}
