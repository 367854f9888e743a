//! APA / MLA / Chicago citation text.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use citeweave_common::Result;

use crate::fields;

/// The three supported citation styles, in output order.
pub const STYLES: [&str; 3] = ["apa", "mla", "chicago"];

pub fn format_apa(record: &Value) -> String {
    let authors = fields::authors(record);
    let year = fields::year(record);
    let title = fields::title(record);
    let journal = fields::journal(record);
    let doi = fields::doi(record);

    let mut citation = format!("{authors} ({year}). {title}.");
    if !journal.is_empty() {
        citation.push_str(&format!(" {journal}."));
    }
    if !doi.is_empty() {
        citation.push_str(&format!(" doi:{doi}"));
    }
    citation
}

pub fn format_mla(record: &Value) -> String {
    format!(
        "{}. \"{}.\" {}, {}.",
        fields::authors(record),
        fields::title(record),
        fields::journal(record),
        fields::year(record)
    )
}

pub fn format_chicago(record: &Value) -> String {
    format!(
        "{}. \"{}.\" {} ({}).",
        fields::authors(record),
        fields::title(record),
        fields::journal(record),
        fields::year(record)
    )
}

/// Render one style for every record, blank-line separated.
pub fn render_style(records: &[Value], style: &str) -> String {
    let format_one: fn(&Value) -> String = match style {
        "mla" => format_mla,
        "chicago" => format_chicago,
        _ => format_apa,
    };
    records
        .iter()
        .map(format_one)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write `<prefix>_apa.txt`, `<prefix>_mla.txt`, and `<prefix>_chicago.txt`.
pub fn write_citation_files(records: &[Value], prefix: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(STYLES.len());
    for style in STYLES {
        let path = PathBuf::from(format!("{}_{style}.txt", prefix.display()));
        fs::write(&path, render_style(records, style))?;
        written.push(path);
    }
    info!(count = records.len(), prefix = %prefix.display(), "Citations formatted");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apa_minimal_record_no_suffixes() {
        let r = json!({ "authors": [{ "name": "A. Smith" }], "title": "X", "year": 2020 });
        assert_eq!(format_apa(&r), "A. Smith (2020). X.");
    }

    #[test]
    fn test_apa_with_journal_and_doi() {
        let r = json!({
            "author": "J. Doe",
            "title": "On Things",
            "year": 2021,
            "journal": "Nature",
            "doi": "10.1/x"
        });
        assert_eq!(format_apa(&r), "J. Doe (2021). On Things. Nature. doi:10.1/x");
    }

    #[test]
    fn test_mla_and_chicago_shapes() {
        let r = json!({ "author": "J. Doe", "title": "On Things", "year": 2021, "journal": "Nature" });
        assert_eq!(format_mla(&r), "J. Doe. \"On Things.\" Nature, 2021.");
        assert_eq!(format_chicago(&r), "J. Doe. \"On Things.\" Nature (2021).");
    }

    #[test]
    fn test_authorless_record_uses_placeholder() {
        let r = json!({ "title": "Anonymous Work", "year": 1900 });
        assert!(format_apa(&r).starts_with("Unknown Author (1900)."));
    }

    #[test]
    fn test_render_style_blank_line_separated() {
        let records = vec![
            json!({ "author": "A", "title": "T1", "year": 2000 }),
            json!({ "author": "B", "title": "T2", "year": 2001 }),
        ];
        let text = render_style(&records, "apa");
        assert_eq!(text.matches("\n\n").count(), 1);
    }

    #[test]
    fn test_write_citation_files_suffix_convention() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("article_1_openalex_rake");
        let records = vec![json!({ "author": "A", "title": "T", "year": 2000 })];
        let written = write_citation_files(&records, &prefix).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "article_1_openalex_rake_apa.txt",
                "article_1_openalex_rake_mla.txt",
                "article_1_openalex_rake_chicago.txt"
            ]
        );
        for path in written {
            assert!(path.exists());
        }
    }
}
