//! Pooling strategies for collapsing token embeddings into sentence embeddings.

use candle_core::Tensor;
use serde::{Deserialize, Serialize};

/// Strategy for converting token embeddings to a single sentence embedding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PoolingStrategy {
    /// Mean over non-padding tokens.
    Mean,
    /// The [CLS] token embedding.
    #[default]
    Cls,
    /// Elementwise max over non-padding tokens.
    Max,
}

impl PoolingStrategy {
    /// Apply pooling.
    ///
    /// `embeddings` has shape (batch, seq_len, hidden); `attention_mask` has
    /// shape (batch, seq_len). Returns (batch, hidden).
    pub fn apply(&self, embeddings: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
        match self {
            PoolingStrategy::Mean => mean_pool(embeddings, attention_mask),
            PoolingStrategy::Cls => cls_pool(embeddings),
            PoolingStrategy::Max => max_pool(embeddings, attention_mask),
        }
    }
}

/// Mean over non-padding tokens, weighted by the attention mask.
fn mean_pool(embeddings: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask_expanded = attention_mask.unsqueeze(2)?.expand(embeddings.shape())?;

    let sum_embeddings = (embeddings * &mask_expanded)?.sum(1)?;

    // Clamp the mask sum to avoid division by zero on all-padding rows
    let sum_mask = attention_mask
        .unsqueeze(2)?
        .sum(1)?
        .clamp(1e-9f32, f32::MAX)?;

    sum_embeddings.broadcast_div(&sum_mask)
}

/// First-token ([CLS]) embedding.
fn cls_pool(embeddings: &Tensor) -> candle_core::Result<Tensor> {
    embeddings.narrow(1, 0, 1)?.squeeze(1)
}

/// Elementwise max over non-padding tokens. Padding positions are pushed to a
/// large negative value before the max so they never win.
fn max_pool(embeddings: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask_expanded = attention_mask.unsqueeze(2)?.expand(embeddings.shape())?;

    // mask - 1 is 0 for real tokens, -1 for padding
    let mask_offset = (&mask_expanded - 1.0)?;
    let large_neg = Tensor::new(-1e9f32, embeddings.device())?;
    let mask_values = mask_offset.broadcast_mul(&large_neg)?;
    let masked = embeddings.broadcast_add(&mask_values)?;

    masked.max(1)
}

/// L2-normalize each row of a (batch, hidden) tensor.
pub fn l2_normalize(embeddings: &Tensor) -> candle_core::Result<Tensor> {
    let norms = embeddings.sqr()?.sum_keepdim(1)?.sqrt()?;
    let norms_clamped = norms.clamp(1e-9f32, f32::MAX)?;
    embeddings.broadcast_div(&norms_clamped)
}
