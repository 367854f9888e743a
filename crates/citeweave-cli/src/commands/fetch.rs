//! `fetch` stage: one strategy's keyword list queried against one source.

use std::path::Path;

use tracing::info;

use citeweave_common::{Result, Source, Strategy};
use citeweave_ingestion::fetch_references;
use citeweave_keywords::{clean::clean_keywords, KeywordSet};

use crate::config::Config;

use super::{read_json, write_json_pretty};

/// An empty keyword list for the selected strategy is fatal: there is nothing
/// to query, and writing an empty reference file would silently poison every
/// downstream stage.
pub async fn fetch(
    config: &Config,
    keywords_path: &Path,
    output: &Path,
    source: Source,
    strategy: Strategy,
    clean: bool,
) -> Result<()> {
    let set: KeywordSet = serde_json::from_value(read_json(keywords_path)?)?;
    let mut keywords = set.for_strategy(strategy).to_vec();
    if keywords.is_empty() {
        return Err(anyhow::anyhow!(
            "no keywords stored under '{strategy}' in {}",
            keywords_path.display()
        )
        .into());
    }

    if clean {
        let terms = clean_keywords(&keywords);
        if terms.is_empty() {
            return Err(anyhow::anyhow!(
                "cleaning removed every '{strategy}' keyword; rerun without --clean"
            )
            .into());
        }
        info!(before = keywords.len(), after = terms.len(), "Cleaned keywords into search terms");
        keywords = terms;
    }

    let references =
        fetch_references(source, &keywords, config.fetch.max_results_per_keyword).await?;
    write_json_pretty(output, &references)?;
    info!(path = %output.display(), "References saved");
    Ok(())
}
