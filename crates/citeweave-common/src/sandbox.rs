use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::error::CiteweaveError;

const USER_AGENT: &str = "Citeweave/0.1 (mailto:citeweave@example.com)";

/// An allowlist-capped HTTP client. Requests are only permitted to the
/// bibliographic API hosts the pipeline talks to; anything else is refused
/// before a connection is attempted.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client allowing the three bibliographic API hosts.
    pub fn new() -> Result<Self, CiteweaveError> {
        let mut allowlist = HashSet::new();
        let domains = [
            "api.openalex.org",       // OpenAlex works search
            "api.semanticscholar.org", // Semantic Scholar graph API
            "api.crossref.org",       // Crossref works search
        ];
        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CiteweaveError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current policy.
    /// Subdomains of an allowed host are also permitted.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{allowed}")) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Starts a GET request builder, refusing non-allowlisted URLs.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, CiteweaveError> {
        if !self.is_allowed(url) {
            return Err(CiteweaveError::Security(format!(
                "domain not in allowlist for URL {url}"
            )));
        }
        Ok(self.client.get(url))
    }
}
