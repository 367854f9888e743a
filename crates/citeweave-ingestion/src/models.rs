//! Data models for reference ingestion.

use serde::{Deserialize, Serialize};

use citeweave_common::Source;

/// A bibliographic record normalised from one source's response schema.
///
/// Every field except the title is optional; source clients fill what their
/// API provides and leave the rest defaulted. Field absence is never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub journal: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub source: Source,
}

impl ReferenceRecord {
    /// An empty record tagged with its source; clients fill in fields.
    pub fn empty(source: Source) -> Self {
        Self {
            title: String::new(),
            authors: Vec::new(),
            year: None,
            journal: None,
            doi: None,
            url: None,
            abstract_text: None,
            source,
        }
    }
}
