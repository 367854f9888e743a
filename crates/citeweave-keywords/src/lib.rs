//! citeweave-keywords — Keyword extraction over article text.
//!
//! Three independent strategies:
//! - `rake`: stopword-delimited phrase extraction with degree/frequency scores
//! - `yake`: single-term statistical scoring
//! - `bert_score`: RAKE candidates re-ranked by BERT embedding similarity
//!
//! Each strategy has no fallback; a failing strategy fails the invocation.

pub mod bert_score;
pub mod clean;
pub mod rake;
pub mod stopwords;
pub mod yake;

use serde::{Deserialize, Serialize};

use citeweave_common::{Result, Strategy};
use citeweave_embed::{BertEmbedder, EmbeddingConfig};

/// One ranked keyword list per extraction strategy. Serializes to the
/// keywords JSON artifact with exactly the three strategy keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSet {
    pub rake: Vec<String>,
    pub yake: Vec<String>,
    pub bert_score: Vec<String>,
}

impl KeywordSet {
    pub fn for_strategy(&self, strategy: Strategy) -> &[String] {
        match strategy {
            Strategy::Rake => &self.rake,
            Strategy::Yake => &self.yake,
            Strategy::BertScore => &self.bert_score,
        }
    }
}

/// Run all three strategies over `text`, capping each list at `max_keywords`.
///
/// The `bert_score` strategy reuses the RAKE phrases as its candidate set and
/// loads the embedding model on demand; model load or inference failure is
/// fatal to the whole extraction.
pub async fn extract_all(
    text: &str,
    max_keywords: usize,
    embedding: EmbeddingConfig,
) -> Result<KeywordSet> {
    tracing::info!("Extracting RAKE keywords");
    let rake = rake::extract(text, max_keywords);

    tracing::info!("Extracting YAKE keywords");
    let yake = yake::extract(text, max_keywords);

    tracing::info!("Ranking candidate phrases with {}", embedding.model_id);
    let embedder = BertEmbedder::new(embedding)
        .await
        .map_err(|e| anyhow::anyhow!("embedder init failed: {e}"))?;
    let bert = bert_score::extract(&embedder, text, &rake, max_keywords).await?;

    Ok(KeywordSet {
        rake,
        yake,
        bert_score: bert,
    })
}
