//! BibTeX export.
//!
//! One `@article` entry per record with sequential keys (`ref1`, `ref2`, …).
//! Fields that resolve to nothing are omitted from the entry entirely, never
//! emitted empty.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use citeweave_common::Result;

use crate::fields;

/// Render one record as a BibTeX entry. `index` is 1-based.
pub fn render_entry(record: &Value, index: usize) -> String {
    let authors = fields::author_list(record).join(" and ");
    let title = fields::title_raw(record);
    let journal = fields::venue(record);
    let year = fields::year_raw(record);
    let doi = fields::doi(record);

    let mut entry = format!("@article{{ref{index},\n");
    if !authors.is_empty() {
        entry.push_str(&format!("  author = {{{authors}}},\n"));
    }
    if !title.is_empty() {
        entry.push_str(&format!("  title = {{{title}}},\n"));
    }
    if !journal.is_empty() {
        entry.push_str(&format!("  journal = {{{journal}}},\n"));
    }
    if !year.is_empty() {
        entry.push_str(&format!("  year = {{{year}}},\n"));
    }
    if !doi.is_empty() {
        entry.push_str(&format!("  doi = {{{doi}}},\n"));
    }
    entry.push_str("}\n");
    entry
}

/// Render all records and write the `.bib` file.
pub fn write_bibtex(records: &[Value], path: &Path) -> Result<()> {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        out.push_str(&render_entry(record, i + 1));
        out.push('\n');
    }
    fs::write(path, out)?;
    info!(count = records.len(), path = %path.display(), "BibTeX entries saved");
    Ok(())
}
