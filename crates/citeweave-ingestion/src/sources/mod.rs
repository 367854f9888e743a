//! Bibliographic source clients.

pub mod crossref;
pub mod openalex;
pub mod semanticscholar;

use async_trait::async_trait;

use citeweave_common::{Result, Source};

use crate::models::ReferenceRecord;

/// Common interface for all bibliographic source clients.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Search for works matching one keyword, returning at most
    /// `max_results` normalised records.
    async fn search(&self, keyword: &str, max_results: usize) -> Result<Vec<ReferenceRecord>>;

    /// Which source this client queries.
    fn source(&self) -> Source;
}

/// Build the client for a source selector.
pub fn client_for(source: Source) -> Result<Box<dyn ReferenceSource>> {
    Ok(match source {
        Source::OpenAlex => Box::new(openalex::OpenAlexClient::new()?),
        Source::SemanticScholar => Box::new(semanticscholar::SemanticScholarClient::new()?),
        Source::Crossref => Box::new(crossref::CrossrefClient::new()?),
    })
}
