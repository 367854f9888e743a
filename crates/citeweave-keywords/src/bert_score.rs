//! Embedding-similarity keyword extraction.
//!
//! Candidate phrases (the RAKE output) are ranked by cosine similarity of
//! their BERT embedding to the whole-document embedding. The embedder has no
//! fallback: if the model cannot be loaded or inference fails, the strategy
//! fails for this invocation.

use citeweave_embed::{cosine_similarity, BertEmbedder};
use tracing::debug;

use citeweave_common::Result;

/// Rank `candidates` by similarity to `text`, keeping the top `max_keywords`.
pub async fn extract(
    embedder: &BertEmbedder,
    text: &str,
    candidates: &[String],
    max_keywords: usize,
) -> Result<Vec<String>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let doc_embedding = embedder
        .embed_one(text)
        .await
        .map_err(|e| anyhow::anyhow!("document embedding failed: {e}"))?;
    let candidate_embeddings = embedder
        .embed(candidates)
        .await
        .map_err(|e| anyhow::anyhow!("candidate embedding failed: {e}"))?;

    debug!(
        candidates = candidates.len(),
        model = embedder.model_name(),
        "Ranking candidate phrases by embedding similarity"
    );

    Ok(rank_candidates(
        &doc_embedding,
        &candidate_embeddings,
        candidates,
        max_keywords,
    ))
}

/// Pure ranking step, separated from inference so it can be tested without a
/// model: sort candidates by descending cosine similarity to the document.
pub fn rank_candidates(
    doc_embedding: &[f32],
    candidate_embeddings: &[Vec<f32>],
    candidates: &[String],
    max_keywords: usize,
) -> Vec<String> {
    let mut scored: Vec<(usize, f32)> = candidate_embeddings
        .iter()
        .enumerate()
        .map(|(i, emb)| (i, cosine_similarity(doc_embedding, emb)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(max_keywords)
        .map(|(i, _)| candidates[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_by_similarity() {
        let doc = vec![1.0f32, 0.0];
        let candidates = vec!["far".to_string(), "near".to_string(), "mid".to_string()];
        let embeddings = vec![
            vec![0.0f32, 1.0],  // orthogonal
            vec![1.0f32, 0.0],  // identical
            vec![0.7f32, 0.7],  // in between
        ];
        let ranked = rank_candidates(&doc, &embeddings, &candidates, 3);
        assert_eq!(ranked, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_rank_respects_cap() {
        let doc = vec![1.0f32];
        let candidates = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let embeddings = vec![vec![1.0f32], vec![0.5f32], vec![0.2f32]];
        assert_eq!(rank_candidates(&doc, &embeddings, &candidates, 2).len(), 2);
    }

    #[test]
    fn test_rank_empty_candidates() {
        assert!(rank_candidates(&[1.0], &[], &[], 5).is_empty());
    }
}
