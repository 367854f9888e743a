//! `run`: the whole pipeline for one article, sequentially.
//!
//! extract → (fetch → format → bibtex → diagram) per (strategy, source) →
//! pipeline graph. A `--strategy` selector restricts fetching to one strategy;
//! without it every strategy runs. Artifact paths follow the configured
//! layout; the list of everything written is printed at the end.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use citeweave_citations::{bibtex::write_bibtex, flatten, styles::write_citation_files};
use citeweave_common::{ArtifactPaths, Result, Source, Strategy};
use citeweave_ingestion::fetch_references;
use citeweave_keywords::KeywordSet;

use crate::config::Config;

use super::{diagram, ensure_parent, extract, read_json, write_json_pretty};

/// Strategies to fetch for: the selected one, or all three.
fn strategies(selector: Option<Strategy>) -> Vec<Strategy> {
    match selector {
        Some(strategy) => vec![strategy],
        None => Strategy::ALL.to_vec(),
    }
}

pub async fn run(config: &Config, article: &Path, strategy: Option<Strategy>) -> Result<()> {
    let paths = config.paths.artifact_paths();
    let base = ArtifactPaths::article_base(article);
    let mut artifacts: Vec<PathBuf> = Vec::new();

    let keywords_path = paths.keywords_file(&base);
    extract::extract(config, article, &keywords_path).await?;
    artifacts.push(keywords_path.clone());

    let set: KeywordSet = serde_json::from_value(read_json(&keywords_path)?)?;

    for strategy in strategies(strategy) {
        let keywords = set.for_strategy(strategy);
        if keywords.is_empty() {
            warn!(%strategy, "No keywords extracted, skipping fetch");
            continue;
        }
        for source in Source::ALL {
            let references_path = paths.references_file(&base, source, strategy);
            let references =
                fetch_references(source, keywords, config.fetch.max_results_per_keyword).await?;
            write_json_pretty(&references_path, &references)?;
            artifacts.push(references_path.clone());

            let records = flatten(&serde_json::to_value(&references)?);

            let prefix = paths.citations_prefix(&base, source, strategy);
            ensure_parent(&prefix)?;
            artifacts.extend(write_citation_files(&records, &prefix)?);

            let bibtex_path = paths.bibtex_file(&base, source, strategy);
            write_bibtex(&records, &bibtex_path)?;
            artifacts.push(bibtex_path);

            let diagram_path = paths.diagram_file(&base, source, strategy);
            diagram::diagram(&references_path, &diagram_path)?;
            artifacts.push(diagram_path);
        }
    }

    let pipeline_path = paths.pipeline_diagram_file(&base);
    diagram::pipeline_graph(config, article, Some(pipeline_path.clone()))?;
    artifacts.push(pipeline_path);

    info!(article = %base, count = artifacts.len(), "Pipeline complete");
    for path in &artifacts {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_restricts_to_one_strategy() {
        assert_eq!(strategies(Some(Strategy::Yake)), vec![Strategy::Yake]);
    }

    #[test]
    fn test_no_selector_runs_all_strategies() {
        assert_eq!(strategies(None), Strategy::ALL.to_vec());
    }
}
