//! Semantic Scholar Graph API paper search client.
//!
//! API: https://api.semanticscholar.org/graph/v1/paper/search

use async_trait::async_trait;
use tracing::{debug, instrument};

use citeweave_common::sandbox::SandboxClient as Client;
use citeweave_common::{Result, Source};

use super::ReferenceSource;
use crate::models::ReferenceRecord;

const S2_SEARCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search";
const S2_FIELDS: &str = "title,authors,year,abstract,url,externalIds";

pub struct SemanticScholarClient {
    client: Client,
}

impl SemanticScholarClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }
}

#[async_trait]
impl ReferenceSource for SemanticScholarClient {
    #[instrument(skip(self))]
    async fn search(&self, keyword: &str, max_results: usize) -> Result<Vec<ReferenceRecord>> {
        let resp = self
            .client
            .get(S2_SEARCH_URL)?
            .query(&[
                ("query", keyword),
                ("limit", &max_results.to_string()),
                ("fields", S2_FIELDS),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "Semantic Scholar query failed for '{keyword}' with status {}",
                resp.status()
            )
            .into());
        }

        let body: serde_json::Value = resp.json().await?;
        let papers = body["data"].as_array().cloned().unwrap_or_default();
        debug!(n = papers.len(), "Semantic Scholar search results");

        Ok(papers.iter().map(paper_to_record).collect())
    }

    fn source(&self) -> Source {
        Source::SemanticScholar
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn paper_to_record(paper: &serde_json::Value) -> ReferenceRecord {
    let authors: Vec<String> = paper["authors"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .filter_map(|a| a["name"].as_str())
        .map(String::from)
        .collect();

    ReferenceRecord {
        title: paper["title"].as_str().unwrap_or("").to_string(),
        authors,
        year: paper["year"].as_i64().map(|y| y as i32),
        // the graph search endpoint carries no venue in these fields
        journal: None,
        doi: paper["externalIds"]["DOI"].as_str().map(String::from),
        url: paper["url"].as_str().map(String::from),
        abstract_text: paper["abstract"].as_str().map(String::from),
        source: Source::SemanticScholar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_to_record_full() {
        let paper = serde_json::json!({
            "title": "Attention Is All You Need",
            "year": 2017,
            "abstract": "The dominant sequence transduction models...",
            "url": "https://www.semanticscholar.org/paper/abc",
            "authors": [{ "name": "Ashish Vaswani" }, { "name": "Noam Shazeer" }]
        });
        let r = paper_to_record(&paper);
        assert_eq!(r.title, "Attention Is All You Need");
        assert_eq!(r.authors.len(), 2);
        assert_eq!(r.year, Some(2017));
        assert!(r.abstract_text.as_deref().unwrap().starts_with("The dominant"));
        assert_eq!(r.source, Source::SemanticScholar);
    }

    #[test]
    fn test_paper_to_record_missing_fields() {
        let r = paper_to_record(&serde_json::json!({ "title": "Bare" }));
        assert_eq!(r.title, "Bare");
        assert!(r.authors.is_empty());
        assert_eq!(r.year, None);
        assert_eq!(r.abstract_text, None);
    }
}
