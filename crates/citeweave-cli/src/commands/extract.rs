//! `extract` stage: article text in, keywords JSON out.

use std::fs;
use std::path::Path;

use tracing::info;

use citeweave_common::{CiteweaveError, Result};

use crate::config::Config;

use super::write_json_pretty;

pub async fn extract(config: &Config, input: &Path, output: &Path) -> Result<()> {
    if !input.exists() {
        return Err(CiteweaveError::MissingArtifact(input.to_path_buf()));
    }
    let text = fs::read_to_string(input)?;
    info!(article = %input.display(), chars = text.len(), "Extracting keywords");

    let set = citeweave_keywords::extract_all(
        &text,
        config.keywords.max_keywords,
        config.embedding.embedding_config(),
    )
    .await?;

    write_json_pretty(output, &set)?;
    info!(path = %output.display(), "Keywords saved");
    Ok(())
}
