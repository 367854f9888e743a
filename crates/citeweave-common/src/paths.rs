//! Artifact file layout.
//!
//! Every stage reads and writes files under a deterministic naming scheme
//! derived from (article, source, strategy). Re-running a stage overwrites
//! its file; nothing is appended or deduplicated across runs.
//!
//! Layout:
//!   articles/<name>.txt
//!   keywords/<name>_keywords.json
//!   references_raw/<name>_references_<source>_<strategy>.json
//!   citations_formatted/<name>_<source>_<strategy>_{apa,mla,chicago}.txt and .bib
//!   diagrams/<name>_<source>_<strategy>_plotly.html and <name>_pipeline.html

use std::path::{Path, PathBuf};

use crate::domain::{Source, Strategy};

/// Root directories for pipeline artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub articles_dir: PathBuf,
    pub keywords_dir: PathBuf,
    pub references_dir: PathBuf,
    pub citations_dir: PathBuf,
    pub diagrams_dir: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            articles_dir: PathBuf::from("articles"),
            keywords_dir: PathBuf::from("keywords"),
            references_dir: PathBuf::from("references_raw"),
            citations_dir: PathBuf::from("citations_formatted"),
            diagrams_dir: PathBuf::from("diagrams"),
        }
    }
}

impl ArtifactPaths {
    /// Article base name: file stem of the input text file.
    pub fn article_base(article_path: &Path) -> String {
        article_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "article".to_string())
    }

    pub fn keywords_file(&self, article: &str) -> PathBuf {
        self.keywords_dir.join(format!("{article}_keywords.json"))
    }

    pub fn references_file(&self, article: &str, source: Source, strategy: Strategy) -> PathBuf {
        self.references_dir
            .join(format!("{article}_references_{source}_{strategy}.json"))
    }

    /// Prefix for the per-style citation files; the formatter appends
    /// `_apa.txt`, `_mla.txt`, `_chicago.txt`.
    pub fn citations_prefix(&self, article: &str, source: Source, strategy: Strategy) -> PathBuf {
        self.citations_dir.join(format!("{article}_{source}_{strategy}"))
    }

    pub fn bibtex_file(&self, article: &str, source: Source, strategy: Strategy) -> PathBuf {
        self.citations_dir
            .join(format!("{article}_{source}_{strategy}.bib"))
    }

    pub fn diagram_file(&self, article: &str, source: Source, strategy: Strategy) -> PathBuf {
        self.diagrams_dir
            .join(format!("{article}_{source}_{strategy}_plotly.html"))
    }

    pub fn pipeline_diagram_file(&self, article: &str) -> PathBuf {
        self.diagrams_dir.join(format!("{article}_pipeline.html"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_base_strips_extension() {
        assert_eq!(
            ArtifactPaths::article_base(Path::new("articles/article_1.txt")),
            "article_1"
        );
    }

    #[test]
    fn test_reference_file_name_is_deterministic() {
        let paths = ArtifactPaths::default();
        let a = paths.references_file("article_1", Source::OpenAlex, Strategy::Rake);
        let b = paths.references_file("article_1", Source::OpenAlex, Strategy::Rake);
        assert_eq!(a, b);
        assert_eq!(
            a,
            PathBuf::from("references_raw/article_1_references_openalex_rake.json")
        );
    }

    #[test]
    fn test_pipeline_diagram_name() {
        let paths = ArtifactPaths::default();
        assert_eq!(
            paths.pipeline_diagram_file("article_1"),
            PathBuf::from("diagrams/article_1_pipeline.html")
        );
    }

    #[test]
    fn test_citation_artifacts_share_prefix() {
        let paths = ArtifactPaths::default();
        let prefix = paths.citations_prefix("a", Source::Crossref, Strategy::Yake);
        let bib = paths.bibtex_file("a", Source::Crossref, Strategy::Yake);
        assert_eq!(
            bib,
            PathBuf::from(format!("{}.bib", prefix.display()))
        );
    }
}
