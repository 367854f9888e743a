//! citeweave — citation-research pipeline CLI.
//!
//! Stages are exposed as subcommands so each can be re-run independently;
//! `run` chains all of them for one article.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use citeweave_common::{Source, Strategy};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "citeweave",
    version,
    about = "Extract keywords, fetch references, format citations, draw pipeline graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract keywords from an article text file with all three strategies
    Extract {
        /// Article text file
        input: PathBuf,
        /// Keywords JSON output path
        output: PathBuf,
    },
    /// Fetch references for one strategy's keywords from one source
    Fetch {
        /// Keywords JSON file produced by `extract`
        keywords: PathBuf,
        /// Reference JSON output path
        output: PathBuf,
        /// Source selector: openalex, semanticscholar, or crossref
        source: Source,
        /// Strategy selector: rake, yake, or bert_score
        strategy: Strategy,
        /// Clean keywords into search terms before querying
        #[arg(long)]
        clean: bool,
    },
    /// Format references into APA, MLA, and Chicago citation files
    Format {
        /// Reference JSON file produced by `fetch`
        references: PathBuf,
        /// Output path prefix; `_apa.txt`, `_mla.txt`, `_chicago.txt` are appended
        prefix: PathBuf,
    },
    /// Export references as a BibTeX file
    Bibtex {
        references: PathBuf,
        output: PathBuf,
    },
    /// Render the keyword → reference graph for one reference file
    Diagram {
        references: PathBuf,
        output: PathBuf,
    },
    /// Render the full article → strategy → keyword → reference → source graph
    PipelineGraph {
        /// Article text file; sibling artifacts are located via the configured layout
        article: PathBuf,
        /// HTML output path (defaults to the configured diagrams directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the whole pipeline for one article
    Run {
        /// Article text file
        article: PathBuf,
        /// Restrict fetching to one strategy (all three when omitted)
        #[arg(long)]
        strategy: Option<Strategy>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("citeweave=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Extract { input, output } => {
            commands::extract::extract(&config, &input, &output).await?
        }
        Command::Fetch {
            keywords,
            output,
            source,
            strategy,
            clean,
        } => commands::fetch::fetch(&config, &keywords, &output, source, strategy, clean).await?,
        Command::Format { references, prefix } => commands::format::format(&references, &prefix)?,
        Command::Bibtex { references, output } => commands::format::bibtex(&references, &output)?,
        Command::Diagram { references, output } => {
            commands::diagram::diagram(&references, &output)?
        }
        Command::PipelineGraph { article, output } => {
            commands::diagram::pipeline_graph(&config, &article, output)?
        }
        Command::Run { article, strategy } => {
            commands::run::run(&config, &article, strategy).await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_selectors_are_positional() {
        let cli = Cli::try_parse_from([
            "citeweave",
            "fetch",
            "keywords/a_keywords.json",
            "references_raw/out.json",
            "openalex",
            "rake",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch {
                source,
                strategy,
                clean,
                ..
            } => {
                assert_eq!(source, Source::OpenAlex);
                assert_eq!(strategy, Strategy::Rake);
                assert!(!clean);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_unknown_selector_rejected() {
        let result = Cli::try_parse_from([
            "citeweave",
            "fetch",
            "k.json",
            "o.json",
            "scopus",
            "rake",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_strategy_selector_optional() {
        let cli = Cli::try_parse_from(["citeweave", "run", "articles/a.txt"]).unwrap();
        match cli.command {
            Command::Run { strategy, .. } => assert_eq!(strategy, None),
            _ => panic!("expected run"),
        }

        let cli =
            Cli::try_parse_from(["citeweave", "run", "articles/a.txt", "--strategy", "yake"])
                .unwrap();
        match cli.command {
            Command::Run { strategy, .. } => assert_eq!(strategy, Some(Strategy::Yake)),
            _ => panic!("expected run"),
        }
    }
}
