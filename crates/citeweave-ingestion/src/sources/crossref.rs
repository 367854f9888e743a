//! Crossref works search client.
//!
//! API: https://api.crossref.org/works?query=<term>&rows=<n>
//! Polite pool: the shared client sets a User-Agent with a mailto
//! (see Crossref etiquette).

use async_trait::async_trait;
use tracing::{debug, instrument};

use citeweave_common::sandbox::SandboxClient as Client;
use citeweave_common::{Result, Source};

use super::ReferenceSource;
use crate::models::ReferenceRecord;

const CR_SEARCH_URL: &str = "https://api.crossref.org/works";

pub struct CrossrefClient {
    client: Client,
}

impl CrossrefClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }
}

#[async_trait]
impl ReferenceSource for CrossrefClient {
    #[instrument(skip(self))]
    async fn search(&self, keyword: &str, max_results: usize) -> Result<Vec<ReferenceRecord>> {
        let resp = self
            .client
            .get(CR_SEARCH_URL)?
            .query(&[
                ("query", keyword),
                ("rows", &max_results.to_string()),
                ("select", "DOI,title,author,container-title,issued,URL"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "Crossref query failed for '{keyword}' with status {}",
                resp.status()
            )
            .into());
        }

        let body: serde_json::Value = resp.json().await?;
        let items = body["message"]["items"].as_array().cloned().unwrap_or_default();
        debug!(n = items.len(), "Crossref search results");

        Ok(items.iter().map(work_to_record).collect())
    }

    fn source(&self) -> Source {
        Source::Crossref
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn work_to_record(work: &serde_json::Value) -> ReferenceRecord {
    let title = work["title"]
        .as_array()
        .and_then(|t| t.first())
        .and_then(|t| t.as_str())
        .unwrap_or("")
        .to_string();

    let authors: Vec<String> = work["author"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .map(|a| {
            let given = a["given"].as_str().unwrap_or("").trim().to_string();
            let family = a["family"].as_str().unwrap_or("").trim().to_string();
            if given.is_empty() {
                family
            } else {
                format!("{given} {family}")
            }
        })
        .filter(|name| !name.is_empty())
        .collect();

    let journal = work["container-title"]
        .as_array()
        .and_then(|j| j.first())
        .and_then(|j| j.as_str())
        .map(String::from);

    let year = work["issued"]["date-parts"]
        .as_array()
        .and_then(|dp| dp.first())
        .and_then(|dp| dp.as_array())
        .and_then(|parts| parts.first())
        .and_then(|y| y.as_i64())
        .map(|y| y as i32);

    ReferenceRecord {
        title,
        authors,
        year,
        journal,
        doi: work["DOI"].as_str().map(String::from),
        url: work["URL"].as_str().map(String::from),
        abstract_text: None,
        source: Source::Crossref,
    }
}
