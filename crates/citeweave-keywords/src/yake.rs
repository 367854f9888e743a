//! YAKE single-term keyword extraction.
//!
//! Unsupervised statistical scoring: each candidate term combines casing,
//! position, frequency, relatedness-to-context, and sentence-dispersion
//! features into a score where lower is better.

use std::collections::{HashMap, HashSet};

use crate::stopwords::is_stopword;

#[derive(Default)]
struct TermStats {
    tf: f64,
    tf_upper: f64,
    tf_proper: f64,
    sentence_indices: Vec<usize>,
    left_neighbors: HashSet<String>,
    right_neighbors: HashSet<String>,
    left_total: f64,
    right_total: f64,
}

/// Extract up to `max_keywords` single-word keywords, best first.
pub fn extract(text: &str, max_keywords: usize) -> Vec<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut stats: HashMap<String, TermStats> = HashMap::new();

    for (sentence_idx, sentence) in sentences.iter().enumerate() {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        for (pos, raw) in tokens.iter().enumerate() {
            let token = strip_punct(raw);
            let Some(term) = normalize(&token) else {
                continue;
            };

            let entry = stats.entry(term).or_default();
            entry.tf += 1.0;
            entry.sentence_indices.push(sentence_idx);
            if token.len() > 1 && token.chars().all(|c| !c.is_lowercase()) {
                entry.tf_upper += 1.0;
            } else if pos > 0 && token.chars().next().is_some_and(|c| c.is_uppercase()) {
                entry.tf_proper += 1.0;
            }

            if pos > 0 {
                if let Some(left) = normalize(&strip_punct(tokens[pos - 1])) {
                    entry.left_neighbors.insert(left);
                    entry.left_total += 1.0;
                }
            }
            if pos + 1 < tokens.len() {
                if let Some(right) = normalize(&strip_punct(tokens[pos + 1])) {
                    entry.right_neighbors.insert(right);
                    entry.right_total += 1.0;
                }
            }
        }
    }

    if stats.is_empty() {
        return Vec::new();
    }

    let tfs: Vec<f64> = stats.values().map(|s| s.tf).collect();
    let mean_tf = tfs.iter().sum::<f64>() / tfs.len() as f64;
    let std_tf = (tfs.iter().map(|t| (t - mean_tf).powi(2)).sum::<f64>() / tfs.len() as f64).sqrt();
    let max_tf = tfs.iter().cloned().fold(f64::MIN, f64::max);
    let sentence_count = sentences.len() as f64;

    let mut scored: Vec<(String, f64)> = stats
        .into_iter()
        .map(|(term, s)| {
            let casing = s.tf_upper.max(s.tf_proper) / (1.0 + s.tf.ln());

            let median_pos = median(&s.sentence_indices);
            let position = (3.0 + median_pos).ln().ln();

            let frequency = s.tf / (mean_tf + std_tf);

            let dl = if s.left_total > 0.0 {
                s.left_neighbors.len() as f64 / s.left_total
            } else {
                0.0
            };
            let dr = if s.right_total > 0.0 {
                s.right_neighbors.len() as f64 / s.right_total
            } else {
                0.0
            };
            let relatedness = 1.0 + (dl + dr) * (s.tf / max_tf);

            let distinct_sentences: HashSet<usize> = s.sentence_indices.iter().copied().collect();
            let dispersion = distinct_sentences.len() as f64 / sentence_count;

            let score =
                (relatedness * position) / (casing + frequency / relatedness + dispersion / relatedness);
            (term, score)
        })
        .collect();

    // Lower score = better keyword
    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(max_keywords);
    scored.into_iter().map(|(term, _)| term).collect()
}

/// Lowercased candidate term, or None for stopwords, short tokens, and
/// tokens without letters.
fn normalize(token: &str) -> Option<String> {
    let lower = token.to_lowercase();
    if lower.len() <= 2 || is_stopword(&lower) || !lower.chars().any(|c| c.is_alphabetic()) {
        None
    } else {
        Some(lower)
    }
}

fn strip_punct(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}

fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn median(indices: &[usize]) -> f64 {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_unstable();
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}
