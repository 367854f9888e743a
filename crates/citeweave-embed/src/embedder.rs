//! BERT embedder using Candle.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, HiddenAct, PositionEmbeddingType};
use hf_hub::api::sync::Api;
use lru::LruCache;
use tokenizers::models::wordpiece::WordPieceBuilder;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::pooling::l2_normalize;
use crate::{EmbedError, EmbeddingConfig, Result};

/// BERT sentence embedder.
///
/// Downloads the model from the Hugging Face Hub on first use and runs
/// batched CPU inference. Candidate phrase sets in this pipeline are small
/// (at most the keyword cap), so no GPU path is wired up.
pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    config: EmbeddingConfig,
    cache: Option<Arc<Mutex<LruCache<String, Vec<f32>>>>>,
}

impl BertEmbedder {
    /// Load the configured model, downloading it from the Hub if needed.
    pub async fn new(config: EmbeddingConfig) -> Result<Self> {
        let start = Instant::now();
        info!("Loading BERT model: {}", config.model_id);

        let device = Device::Cpu;

        // Hub downloads use the sync API; keep them off the async runtime.
        let model_id = config.model_id.clone();
        let (bert_config, tokenizer, weights_path) = tokio::task::spawn_blocking(move || {
            use hf_hub::{Repo, RepoType};

            let api = Api::new().map_err(|e| EmbedError::Download(format!("API init: {e}")))?;
            let repo = api.repo(Repo::new(model_id.clone(), RepoType::Model));

            let config_path = repo
                .get("config.json")
                .map_err(|e| EmbedError::Download(format!("config.json: {e}")))?;
            let bert_config = load_bert_config(&config_path)?;

            // tokenizer.json for newer checkpoints, vocab.txt for older BERT models
            let tokenizer = if let Ok(tokenizer_path) = repo.get("tokenizer.json") {
                Tokenizer::from_file(&tokenizer_path)
                    .map_err(|e| EmbedError::Tokenizer(e.to_string()))?
            } else {
                debug!("tokenizer.json not found, building WordPiece from vocab.txt");
                let vocab_path = repo
                    .get("vocab.txt")
                    .map_err(|e| EmbedError::Download(format!("vocab.txt: {e}")))?;
                let vocab_content = std::fs::read_to_string(&vocab_path)?;
                let vocab: ahash::AHashMap<String, u32> = vocab_content
                    .lines()
                    .enumerate()
                    .map(|(i, line)| (line.to_string(), i as u32))
                    .collect();
                let wordpiece = WordPieceBuilder::new()
                    .vocab(vocab)
                    .continuing_subword_prefix("##".to_string())
                    .max_input_chars_per_word(100)
                    .unk_token("[UNK]".to_string())
                    .build()
                    .map_err(|e| EmbedError::Tokenizer(format!("WordPiece build: {e}")))?;
                Tokenizer::new(wordpiece)
            };

            let weights_path = repo
                .get("model.safetensors")
                .or_else(|_| repo.get("pytorch_model.bin"))
                .map_err(|e| EmbedError::Download(format!("model weights: {e}")))?;

            Ok::<_, EmbedError>((bert_config, tokenizer, weights_path))
        })
        .await
        .map_err(|e| EmbedError::Download(e.to_string()))??;

        let vb = if weights_path
            .extension()
            .map(|e| e == "safetensors")
            .unwrap_or(false)
        {
            unsafe { VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, &device)?
        };

        let model = BertModel::load(vb, &bert_config)
            .map_err(|e| EmbedError::ModelLoad(e.to_string()))?;
        info!("Model loaded in {:.2}s", start.elapsed().as_secs_f32());

        let cache = NonZeroUsize::new(config.cache_size)
            .map(|n| Arc::new(Mutex::new(LruCache::new(n))));

        Ok(Self {
            model,
            tokenizer,
            device,
            config,
            cache,
        })
    }

    /// Embed a list of texts, returning one vector per text in input order.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut pending_indices = Vec::new();
        let mut pending_texts = Vec::new();

        if let Some(cache) = &self.cache {
            let mut guard = cache.lock().map_err(|_| {
                EmbedError::Inference("embedding cache lock poisoned".to_string())
            })?;
            for (i, text) in texts.iter().enumerate() {
                if let Some(cached) = guard.get(text) {
                    results[i] = Some(cached.clone());
                } else {
                    pending_indices.push(i);
                    pending_texts.push(text.clone());
                }
            }
        } else {
            pending_indices = (0..texts.len()).collect();
            pending_texts = texts.to_vec();
        }

        for batch_start in (0..pending_texts.len()).step_by(self.config.batch_size) {
            let batch_end = (batch_start + self.config.batch_size).min(pending_texts.len());
            let batch = &pending_texts[batch_start..batch_end];
            let batch_embeddings = self.forward_batch(batch)?;

            if let Some(cache) = &self.cache {
                let mut guard = cache.lock().map_err(|_| {
                    EmbedError::Inference("embedding cache lock poisoned".to_string())
                })?;
                for (text, embedding) in batch.iter().zip(batch_embeddings.iter()) {
                    guard.put(text.clone(), embedding.clone());
                }
            }

            for (j, embedding) in batch_embeddings.into_iter().enumerate() {
                results[pending_indices[batch_start + j]] = Some(embedding);
            }
        }

        results
            .into_iter()
            .map(|r| r.ok_or_else(|| EmbedError::Inference("missing embedding".to_string())))
            .collect()
    }

    /// Embed a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::InvalidInput("no embedding produced".to_string()))
    }

    /// The model this embedder was loaded with.
    pub fn model_name(&self) -> &str {
        &self.config.model_id
    }

    fn forward_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let text_refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let encodings = self
            .tokenizer
            .encode_batch(text_refs, true)
            .map_err(|e| EmbedError::Tokenizer(e.to_string()))?;

        let mut input_ids_vec = Vec::with_capacity(texts.len());
        let mut attention_mask_vec = Vec::with_capacity(texts.len());
        let mut token_type_ids_vec = Vec::with_capacity(texts.len());

        let max_allowed = self.config.max_length.min(512);
        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let type_ids = encoding.get_type_ids();
            let len = ids.len().min(max_allowed);
            input_ids_vec.push(ids[..len].to_vec());
            attention_mask_vec.push(mask[..len].to_vec());
            token_type_ids_vec.push(type_ids[..len].to_vec());
        }

        let max_len = input_ids_vec.iter().map(|v| v.len()).max().unwrap_or(0);
        for ((ids, mask), type_ids) in input_ids_vec
            .iter_mut()
            .zip(attention_mask_vec.iter_mut())
            .zip(token_type_ids_vec.iter_mut())
        {
            let pad_len = max_len - ids.len();
            ids.extend(std::iter::repeat_n(0, pad_len));
            mask.extend(std::iter::repeat_n(0, pad_len));
            type_ids.extend(std::iter::repeat_n(0, pad_len));
        }

        let batch_size = texts.len();
        let input_ids = Tensor::new(input_ids_vec, &self.device)?.reshape((batch_size, max_len))?;
        // The mask participates in broadcast arithmetic during pooling, so F32
        let attention_mask = Tensor::new(attention_mask_vec, &self.device)?
            .reshape((batch_size, max_len))?
            .to_dtype(DType::F32)?;
        let token_type_ids =
            Tensor::new(token_type_ids_vec, &self.device)?.reshape((batch_size, max_len))?;

        let embeddings = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = self.config.pooling.apply(&embeddings, &attention_mask)?;
        let pooled = if self.config.normalize {
            l2_normalize(&pooled)?
        } else {
            pooled
        };

        Ok(pooled.to_vec2::<f32>()?)
    }
}

/// Parse a Hub `config.json` into Candle's BERT config, defaulting the fields
/// older checkpoints omit.
fn load_bert_config(path: &std::path::Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&content)?;

    let hidden_act = match json.get("hidden_act").and_then(|v| v.as_str()) {
        Some("relu") => HiddenAct::Relu,
        Some("gelu_new") | Some("gelu_approximate") => HiddenAct::GeluApproximate,
        _ => HiddenAct::Gelu,
    };

    Ok(Config {
        vocab_size: json.get("vocab_size").and_then(|v| v.as_u64()).unwrap_or(30522) as usize,
        hidden_size: json.get("hidden_size").and_then(|v| v.as_u64()).unwrap_or(768) as usize,
        num_hidden_layers: json
            .get("num_hidden_layers")
            .and_then(|v| v.as_u64())
            .unwrap_or(12) as usize,
        num_attention_heads: json
            .get("num_attention_heads")
            .and_then(|v| v.as_u64())
            .unwrap_or(12) as usize,
        intermediate_size: json
            .get("intermediate_size")
            .and_then(|v| v.as_u64())
            .unwrap_or(3072) as usize,
        hidden_act,
        hidden_dropout_prob: json
            .get("hidden_dropout_prob")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.1),
        max_position_embeddings: json
            .get("max_position_embeddings")
            .and_then(|v| v.as_u64())
            .unwrap_or(512) as usize,
        type_vocab_size: json.get("type_vocab_size").and_then(|v| v.as_u64()).unwrap_or(2) as usize,
        initializer_range: json
            .get("initializer_range")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.02),
        layer_norm_eps: json
            .get("layer_norm_eps")
            .and_then(|v| v.as_f64())
            .unwrap_or(1e-12),
        pad_token_id: json.get("pad_token_id").and_then(|v| v.as_u64()).unwrap_or(0) as usize,
        position_embedding_type: PositionEmbeddingType::Absolute,
        use_cache: true,
        classifier_dropout: None,
        model_type: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bert_config_defaults() {
        let dir = std::env::temp_dir().join("citeweave_embed_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"hidden_size": 384, "hidden_act": "gelu"}"#).unwrap();

        let cfg = load_bert_config(&path).unwrap();
        assert_eq!(cfg.hidden_size, 384);
        assert_eq!(cfg.vocab_size, 30522);
        assert_eq!(cfg.num_hidden_layers, 12);
    }
}
