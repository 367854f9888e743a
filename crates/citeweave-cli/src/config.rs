//! Configuration loading for Citeweave.
//! Reads citeweave.toml from the current directory or the path in the
//! CITEWEAVE_CONFIG env var; a missing file means full defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use citeweave_common::{ArtifactPaths, CiteweaveError, Result};
use citeweave_embed::{EmbeddingConfig, PoolingStrategy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub embedding: EmbeddingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_articles_dir")]
    pub articles_dir: PathBuf,
    #[serde(default = "default_keywords_dir")]
    pub keywords_dir: PathBuf,
    #[serde(default = "default_references_dir")]
    pub references_dir: PathBuf,
    #[serde(default = "default_citations_dir")]
    pub citations_dir: PathBuf,
    #[serde(default = "default_diagrams_dir")]
    pub diagrams_dir: PathBuf,
}

fn default_articles_dir() -> PathBuf { PathBuf::from("articles") }
fn default_keywords_dir() -> PathBuf { PathBuf::from("keywords") }
fn default_references_dir() -> PathBuf { PathBuf::from("references_raw") }
fn default_citations_dir() -> PathBuf { PathBuf::from("citations_formatted") }
fn default_diagrams_dir() -> PathBuf { PathBuf::from("diagrams") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            articles_dir: default_articles_dir(),
            keywords_dir: default_keywords_dir(),
            references_dir: default_references_dir(),
            citations_dir: default_citations_dir(),
            diagrams_dir: default_diagrams_dir(),
        }
    }
}

impl PathsConfig {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            articles_dir: self.articles_dir.clone(),
            keywords_dir: self.keywords_dir.clone(),
            references_dir: self.references_dir.clone(),
            citations_dir: self.citations_dir.clone(),
            diagrams_dir: self.diagrams_dir.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

fn default_max_keywords() -> usize { 10 }

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self { max_keywords: default_max_keywords() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_max_results")]
    pub max_results_per_keyword: usize,
}

fn default_max_results() -> usize { 2 }

impl Default for FetchConfig {
    fn default() -> Self {
        Self { max_results_per_keyword: default_max_results() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSection {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub pooling: PoolingStrategy,
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

fn default_model_id() -> String { "bert-base-uncased".to_string() }
fn default_cache_size() -> usize { 1_000 }

impl Default for EmbeddingSection {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            pooling: PoolingStrategy::default(),
            cache_size: default_cache_size(),
        }
    }
}

impl EmbeddingSection {
    pub fn embedding_config(&self) -> EmbeddingConfig {
        EmbeddingConfig {
            model_id: self.model_id.clone(),
            pooling: self.pooling,
            cache_size: self.cache_size,
            ..EmbeddingConfig::default()
        }
    }
}

impl Config {
    /// Load citeweave.toml, honoring CITEWEAVE_CONFIG. A missing file yields
    /// the defaults; a malformed file is a hard error.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CITEWEAVE_CONFIG").unwrap_or_else(|_| "citeweave.toml".to_string());
        let path = Path::new(&path);
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults (copy citeweave.example.toml to customize)"
            );
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CiteweaveError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.keywords.max_keywords, 10);
        assert_eq!(config.fetch.max_results_per_keyword, 2);
        assert_eq!(config.embedding.model_id, "bert-base-uncased");
        assert_eq!(config.paths.references_dir, PathBuf::from("references_raw"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/citeweave.toml")).unwrap();
        assert_eq!(config.keywords.max_keywords, 10);
    }

    #[test]
    fn test_partial_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citeweave.toml");
        std::fs::write(&path, "[fetch]\nmax_results_per_keyword = 5\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fetch.max_results_per_keyword, 5);
        assert_eq!(config.keywords.max_keywords, 10);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citeweave.toml");
        std::fs::write(&path, "[fetch\nbroken").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CiteweaveError::Config(_))
        ));
    }

    #[test]
    fn test_embedding_section_maps_to_config() {
        let section = EmbeddingSection {
            model_id: "custom/model".to_string(),
            ..Default::default()
        };
        let cfg = section.embedding_config();
        assert_eq!(cfg.model_id, "custom/model");
        assert!(cfg.normalize);
    }
}
