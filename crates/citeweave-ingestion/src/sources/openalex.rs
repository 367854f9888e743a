//! OpenAlex works search client.
//!
//! API: https://api.openalex.org/works?search=<term>&per_page=<n>

use async_trait::async_trait;
use tracing::{debug, instrument};

use citeweave_common::sandbox::SandboxClient as Client;
use citeweave_common::{Result, Source};

use super::ReferenceSource;
use crate::models::ReferenceRecord;

const OA_SEARCH_URL: &str = "https://api.openalex.org/works";

pub struct OpenAlexClient {
    client: Client,
}

impl OpenAlexClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }
}

#[async_trait]
impl ReferenceSource for OpenAlexClient {
    #[instrument(skip(self))]
    async fn search(&self, keyword: &str, max_results: usize) -> Result<Vec<ReferenceRecord>> {
        let resp = self
            .client
            .get(OA_SEARCH_URL)?
            .query(&[("search", keyword), ("per_page", &max_results.to_string())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow::anyhow!(
                "OpenAlex query failed for '{keyword}' with status {}",
                resp.status()
            )
            .into());
        }

        let body: serde_json::Value = resp.json().await?;
        let results = body["results"].as_array().cloned().unwrap_or_default();
        debug!(n = results.len(), "OpenAlex search results");

        Ok(results.iter().map(work_to_record).collect())
    }

    fn source(&self) -> Source {
        Source::OpenAlex
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn work_to_record(work: &serde_json::Value) -> ReferenceRecord {
    let authors: Vec<String> = work["authorships"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .filter_map(|a| a["author"]["display_name"].as_str())
        .map(String::from)
        .collect();

    // host_venue is being phased out of the OpenAlex schema; fall back to the
    // primary location's source name
    let journal = work["host_venue"]["display_name"]
        .as_str()
        .or_else(|| work["primary_location"]["source"]["display_name"].as_str())
        .map(String::from);

    ReferenceRecord {
        title: work["title"].as_str().unwrap_or("").to_string(),
        authors,
        year: work["publication_year"].as_i64().map(|y| y as i32),
        journal,
        doi: work["doi"].as_str().map(String::from),
        url: work["id"].as_str().map(String::from),
        abstract_text: None,
        source: Source::OpenAlex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_to_record_full() {
        let work = serde_json::json!({
            "id": "https://openalex.org/W2741809807",
            "title": "Deep Residual Learning",
            "publication_year": 2016,
            "doi": "https://doi.org/10.1109/cvpr.2016.90",
            "host_venue": { "display_name": "CVPR" },
            "authorships": [
                { "author": { "display_name": "Kaiming He" } },
                { "author": { "display_name": "Xiangyu Zhang" } }
            ]
        });
        let r = work_to_record(&work);
        assert_eq!(r.title, "Deep Residual Learning");
        assert_eq!(r.authors, vec!["Kaiming He", "Xiangyu Zhang"]);
        assert_eq!(r.year, Some(2016));
        assert_eq!(r.journal.as_deref(), Some("CVPR"));
        assert_eq!(r.url.as_deref(), Some("https://openalex.org/W2741809807"));
    }

    #[test]
    fn test_work_to_record_minimal() {
        let r = work_to_record(&serde_json::json!({}));
        assert_eq!(r.title, "");
        assert!(r.authors.is_empty());
        assert_eq!(r.year, None);
        assert_eq!(r.doi, None);
    }

    #[test]
    fn test_primary_location_venue_fallback() {
        let work = serde_json::json!({
            "title": "X",
            "primary_location": { "source": { "display_name": "Nature" } }
        });
        assert_eq!(work_to_record(&work).journal.as_deref(), Some("Nature"));
    }
}
