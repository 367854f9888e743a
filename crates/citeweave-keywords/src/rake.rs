//! RAKE (Rapid Automatic Keyword Extraction).
//!
//! Candidate phrases are maximal runs of content words between stopwords and
//! punctuation. Each word scores degree/frequency over the co-occurrence
//! graph; a phrase scores the sum of its word scores.

use std::collections::HashMap;

use crate::stopwords::is_stopword;

/// Extract up to `max_keywords` ranked phrases from `text`.
pub fn extract(text: &str, max_keywords: usize) -> Vec<String> {
    let phrases = candidate_phrases(text);

    let mut frequency: HashMap<String, f64> = HashMap::new();
    let mut degree: HashMap<String, f64> = HashMap::new();
    for phrase in &phrases {
        let co_occurrences = (phrase.len() - 1) as f64;
        for word in phrase {
            *frequency.entry(word.clone()).or_default() += 1.0;
            *degree.entry(word.clone()).or_default() += co_occurrences;
        }
    }
    // degree(w) counts w itself plus its co-occurring neighbours
    for (word, freq) in &frequency {
        *degree.entry(word.clone()).or_default() += freq;
    }

    let word_score = |word: &str| -> f64 {
        let freq = frequency.get(word).copied().unwrap_or(1.0);
        degree.get(word).copied().unwrap_or(0.0) / freq
    };

    let mut scored: Vec<(String, f64)> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for phrase in &phrases {
        let joined = phrase.join(" ");
        if !seen.insert(joined.clone()) {
            continue;
        }
        let score: f64 = phrase.iter().map(|w| word_score(w)).sum();
        scored.push((joined, score));
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(max_keywords);
    scored.into_iter().map(|(phrase, _)| phrase).collect()
}

/// Split text into candidate phrases: lowercase content-word runs delimited
/// by stopwords, punctuation, and sentence boundaries.
fn candidate_phrases(text: &str) -> Vec<Vec<String>> {
    let mut phrases = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for raw in text.split(|c: char| c.is_whitespace()) {
        // Punctuation attached to a token ends the phrase after the token
        let trimmed: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '\'')
            .collect();
        let breaks_phrase = raw
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace() && c != '-' && c != '\'');

        let word = trimmed.to_lowercase();
        if word.is_empty() || is_stopword(&word) || !word.chars().any(|c| c.is_alphabetic()) {
            if !current.is_empty() {
                phrases.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(word);
        if breaks_phrase && !current.is_empty() {
            phrases.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        phrases.push(current);
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases_break_on_stopwords_and_punctuation() {
        let phrases = candidate_phrases("Deep learning models outperform the classical baselines.");
        assert!(phrases.contains(&vec![
            "deep".to_string(),
            "learning".to_string(),
            "models".to_string(),
            "outperform".to_string()
        ]));
        assert!(phrases.contains(&vec!["classical".to_string(), "baselines".to_string()]));
    }

    #[test]
    fn test_multiword_phrases_outrank_single_words() {
        let text = "Neural networks learn representations. Neural networks generalize. \
                    Training improves accuracy.";
        let keywords = extract(text, 10);
        let nn_pos = keywords.iter().position(|k| k.starts_with("neural networks"));
        let acc_pos = keywords.iter().position(|k| k == "accuracy");
        assert!(nn_pos.is_some());
        if let (Some(nn), Some(acc)) = (nn_pos, acc_pos) {
            assert!(nn < acc, "phrase should outrank lone word: {keywords:?}");
        }
    }

    #[test]
    fn test_cap_respected() {
        let text = "alpha beta. gamma delta. epsilon zeta. eta theta. iota kappa. \
                    lambda mu. nu xi. omicron pi. rho sigma. tau upsilon. phi chi.";
        assert!(extract(text, 3).len() <= 3);
    }

    #[test]
    fn test_duplicate_phrases_emitted_once() {
        let keywords = extract("gradient descent. gradient descent. gradient descent.", 10);
        assert_eq!(
            keywords
                .iter()
                .filter(|k| k.as_str() == "gradient descent")
                .count(),
            1
        );
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extract("", 10).is_empty());
        assert!(extract("the of and with", 10).is_empty());
    }
}
