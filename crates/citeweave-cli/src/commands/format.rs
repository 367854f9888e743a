//! `format` and `bibtex` stages: reference JSON in, citation text / BibTeX out.

use std::path::Path;

use tracing::{info, warn};

use citeweave_citations::{bibtex::write_bibtex, flatten, styles::write_citation_files};
use citeweave_common::Result;

use super::{ensure_parent, read_json};

pub fn format(references_path: &Path, prefix: &Path) -> Result<()> {
    let records = load_records(references_path)?;
    ensure_parent(prefix)?;
    for path in write_citation_files(&records, prefix)? {
        info!(path = %path.display(), "Citations saved");
    }
    Ok(())
}

pub fn bibtex(references_path: &Path, output: &Path) -> Result<()> {
    let records = load_records(references_path)?;
    ensure_parent(output)?;
    write_bibtex(&records, output)?;
    info!(path = %output.display(), "BibTeX saved");
    Ok(())
}

fn load_records(references_path: &Path) -> Result<Vec<serde_json::Value>> {
    let references = read_json(references_path)?;
    let records = flatten(&references);
    if records.is_empty() {
        warn!(path = %references_path.display(), "Reference file holds no records; output will be empty");
    }
    Ok(records)
}
