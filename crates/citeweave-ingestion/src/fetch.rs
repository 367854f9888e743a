//! Per-keyword fetch loop.
//!
//! One HTTP query per keyword, issued sequentially. A failed query (non-2xx
//! or transport error) is logged and recorded as an empty list for that
//! keyword; the loop never retries and never aborts the whole fetch. The
//! resulting map preserves keyword order.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use citeweave_common::{Result, Source};

use crate::models::ReferenceRecord;
use crate::sources::client_for;

/// Keyword → reference list mapping for one (source, strategy) fetch.
///
/// Stored as an insertion-ordered JSON object so the on-disk artifact lists
/// keywords in query order. Values are plain JSON; downstream consumers
/// (formatter, diagrams) read reference files loosely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSet(pub serde_json::Map<String, serde_json::Value>);

impl ReferenceSet {
    pub fn insert(&mut self, keyword: &str, records: Vec<ReferenceRecord>) -> Result<()> {
        self.0
            .insert(keyword.to_string(), serde_json::to_value(records)?);
        Ok(())
    }

    /// Records stored for one keyword, as loose JSON.
    pub fn get(&self, keyword: &str) -> Option<&serde_json::Value> {
        self.0.get(keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fetch references for every keyword from one source.
///
/// Each keyword maps to at most `max_results` records; a keyword whose query
/// failed is indistinguishable from one with no matches (both map to an empty
/// list) — the warn log is the only signal.
pub async fn fetch_references(
    source: Source,
    keywords: &[String],
    max_results: usize,
) -> Result<ReferenceSet> {
    let client = client_for(source)?;
    info!(
        source = %source,
        keywords = keywords.len(),
        max_results,
        "Fetching references"
    );

    let mut set = ReferenceSet::default();
    for keyword in keywords {
        let records = match client.search(keyword, max_results).await {
            Ok(mut records) => {
                records.truncate(max_results);
                records
            }
            Err(e) => {
                warn!(source = %source, keyword = %keyword, error = %e, "Query failed, recording empty result");
                Vec::new()
            }
        };
        set.insert(keyword, records)?;
    }

    Ok(set)
}
