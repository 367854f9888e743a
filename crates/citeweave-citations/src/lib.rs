//! citeweave-citations — Citation formatting and BibTeX export.
//!
//! Consumes reference-set JSON artifacts loosely: either the keyword → list
//! mapping the fetcher writes or a flat record list. Records are flattened in
//! stored order, fields resolved through ordered fallback keys, and rendered
//! into APA/MLA/Chicago text and BibTeX entries.

pub mod bibtex;
pub mod fields;
pub mod styles;

use serde_json::Value;

/// Flatten a reference-set JSON value into one ordered record list.
///
/// A JSON object is treated as keyword → record-list and flattened in key
/// order; a JSON array is taken as-is. Anything else yields no records.
pub fn flatten(references: &Value) -> Vec<Value> {
    match references {
        Value::Object(map) => map
            .values()
            .filter_map(|v| v.as_array())
            .flat_map(|list| list.iter().cloned())
            .collect(),
        Value::Array(list) => list.clone(),
        _ => Vec::new(),
    }
}
