//! citeweave-embed — BERT sentence embeddings on Candle.
//!
//! Loads a BERT checkpoint straight from the Hugging Face Hub (no Python),
//! tokenizes with the `tokenizers` crate, and pools token embeddings into
//! L2-normalized sentence vectors. Used by the `bert_score` keyword strategy
//! to rank candidate phrases by cosine similarity to the document embedding.

pub mod embedder;
pub mod error;
pub mod pooling;

pub use embedder::BertEmbedder;
pub use error::{EmbedError, Result};
pub use pooling::PoolingStrategy;

use serde::{Deserialize, Serialize};

/// Embedder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Hugging Face model ID.
    pub model_id: String,
    /// Maximum sequence length (BERT limit: 512).
    pub max_length: usize,
    /// Batch size for inference.
    pub batch_size: usize,
    /// L2-normalize pooled embeddings.
    pub normalize: bool,
    /// Pooling strategy.
    pub pooling: PoolingStrategy,
    /// Maximum number of cached text embeddings (0 disables the cache).
    pub cache_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_id: "bert-base-uncased".to_string(),
            max_length: 512,
            batch_size: 16,
            normalize: true,
            pooling: PoolingStrategy::Cls,
            cache_size: 1_000,
        }
    }
}

/// Cosine similarity between two embedding vectors.
///
/// Embeddings coming out of [`BertEmbedder`] are already L2-normalized when
/// `normalize` is set, in which case this reduces to a dot product; the full
/// formula is kept so un-normalized vectors compare correctly too.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.6f32, 0.8, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        let a = vec![0.0f32, 0.0];
        let b = vec![1.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_default_config_targets_base_bert() {
        let cfg = EmbeddingConfig::default();
        assert_eq!(cfg.model_id, "bert-base-uncased");
        assert!(cfg.normalize);
    }
}
