//! `diagram` and `pipeline-graph` stages: interactive Plotly HTML artifacts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use citeweave_common::{ArtifactPaths, Result, Source, Strategy};
use citeweave_diagram::plotly::Palette;
use citeweave_diagram::{graph, plotly, render};

use crate::config::Config;

use super::{ensure_parent, read_json};

/// Keyword → reference graph for a single reference file.
pub fn diagram(references_path: &Path, output: &Path) -> Result<()> {
    let references = read_json(references_path)?;
    let graph = graph::keyword_graph(&references);
    let title = "Keyword → Reference Graph";
    let figure = plotly::figure(&graph, title, Palette::Flat);
    ensure_parent(output)?;
    render::write_html(&figure, title, output)
}

/// Full five-tier graph spanning every (strategy, source) pair.
///
/// The keywords file is required; individual reference files that were never
/// fetched are logged and skipped so a partial run still renders.
pub fn pipeline_graph(config: &Config, article: &Path, output: Option<PathBuf>) -> Result<()> {
    let paths = config.paths.artifact_paths();
    let base = ArtifactPaths::article_base(article);

    let keywords = read_json(&paths.keywords_file(&base))?;

    let mut references = HashMap::new();
    for strategy in Strategy::ALL {
        for source in Source::ALL {
            let path = paths.references_file(&base, source, strategy);
            if !path.exists() {
                warn!(path = %path.display(), "Reference file missing, skipping");
                continue;
            }
            references.insert((strategy, source), read_json(&path)?);
        }
    }

    let graph = graph::pipeline_graph(&base, &keywords, &references);
    let title = format!("Full Pipeline Graph for {base}");
    let figure = plotly::figure(&graph, &title, Palette::Pipeline);
    let output = output.unwrap_or_else(|| paths.pipeline_diagram_file(&base));
    ensure_parent(&output)?;
    render::write_html(&figure, &title, &output)
}
