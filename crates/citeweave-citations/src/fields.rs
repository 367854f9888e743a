//! Field resolution over loosely-typed reference records.
//!
//! Reference files accumulated over time carry slightly different schemas
//! (single `author` string, `authors` as name objects or plain strings,
//! `journal` vs `venue`, DOI nested under `externalIds`). Each logical field
//! is resolved through an ordered set of fallback keys; nothing here is ever
//! fatal — unresolvable fields degrade to placeholders or empty strings.

use serde_json::Value;

/// Placeholder when no author key resolves.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Placeholder when no title is present.
pub const UNTITLED: &str = "Untitled";
/// Placeholder year ("no date").
pub const NO_DATE: &str = "n.d.";

/// Resolve the author list: `author` (string or structured list) first, then
/// `authors` (list of `{name}` objects or plain strings).
pub fn author_list(record: &Value) -> Vec<String> {
    if let Some(author) = record.get("author") {
        match author {
            Value::String(s) => {
                return s
                    .split(',')
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty())
                    .collect();
            }
            Value::Array(list) => {
                let names = structured_names(list);
                if !names.is_empty() {
                    return names;
                }
            }
            _ => {}
        }
    }
    if let Some(Value::Array(list)) = record.get("authors") {
        return structured_names(list);
    }
    Vec::new()
}

fn structured_names(list: &[Value]) -> Vec<String> {
    list.iter()
        .filter_map(|a| match a {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => {
                if let Some(name) = a["name"].as_str() {
                    Some(name.to_string())
                } else {
                    let given = a["given"].as_str().unwrap_or("").trim();
                    let family = a["family"].as_str().unwrap_or("").trim();
                    let joined = format!("{given} {family}").trim().to_string();
                    (!joined.is_empty()).then_some(joined)
                }
            }
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Authors joined for citation text, or the placeholder.
pub fn authors(record: &Value) -> String {
    let list = author_list(record);
    if list.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        list.join(", ")
    }
}

pub fn title(record: &Value) -> String {
    match record.get("title").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => UNTITLED.to_string(),
    }
}

/// Title without the placeholder; empty when absent. Used where empty fields
/// are omitted rather than filled in (BibTeX).
pub fn title_raw(record: &Value) -> String {
    record
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

/// Year as display text; numbers and strings both accepted.
pub fn year(record: &Value) -> String {
    match record.get("year") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => NO_DATE.to_string(),
    }
}

/// Year without the placeholder; `year` first, then `publicationYear` (seen in
/// foreign reference files); empty when absent.
pub fn year_raw(record: &Value) -> String {
    for key in ["year", "publicationYear"] {
        match record.get(key) {
            Some(Value::Number(n)) => return n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            _ => {}
        }
    }
    String::new()
}

/// Journal name for citation text: `journal` first, then `venue`. Empty when
/// neither resolves.
pub fn journal(record: &Value) -> String {
    record
        .get("journal")
        .and_then(Value::as_str)
        .or_else(|| record.get("venue").and_then(Value::as_str))
        .unwrap_or("")
        .to_string()
}

/// Venue for BibTeX entries, which prefer the opposite key order: `venue`
/// first, then `journal`.
pub fn venue(record: &Value) -> String {
    record
        .get("venue")
        .and_then(Value::as_str)
        .or_else(|| record.get("journal").and_then(Value::as_str))
        .unwrap_or("")
        .to_string()
}

/// DOI: top-level `doi` first, then `externalIds.DOI`. Empty when absent.
pub fn doi(record: &Value) -> String {
    record
        .get("doi")
        .and_then(Value::as_str)
        .or_else(|| record["externalIds"]["DOI"].as_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_author_string_form() {
        let r = json!({ "author": "A. Smith, B. Jones" });
        assert_eq!(authors(&r), "A. Smith, B. Jones");
        assert_eq!(author_list(&r), vec!["A. Smith", "B. Jones"]);
    }

    #[test]
    fn test_authors_name_objects() {
        let r = json!({ "authors": [{ "name": "A. Smith" }, { "name": "B. Jones" }] });
        assert_eq!(authors(&r), "A. Smith, B. Jones");
    }

    #[test]
    fn test_authors_plain_strings() {
        let r = json!({ "authors": ["A. Smith", "B. Jones"] });
        assert_eq!(authors(&r), "A. Smith, B. Jones");
    }

    #[test]
    fn test_author_given_family_objects() {
        let r = json!({ "author": [{ "given": "Jane", "family": "Doe" }] });
        assert_eq!(author_list(&r), vec!["Jane Doe"]);
    }

    #[test]
    fn test_missing_author_placeholder() {
        assert_eq!(authors(&json!({ "title": "X" })), UNKNOWN_AUTHOR);
        assert_eq!(authors(&json!({ "authors": [] })), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_year_number_string_and_missing() {
        assert_eq!(year(&json!({ "year": 2020 })), "2020");
        assert_eq!(year(&json!({ "year": "2020" })), "2020");
        assert_eq!(year(&json!({})), NO_DATE);
        assert_eq!(year(&json!({ "year": null })), NO_DATE);
    }

    #[test]
    fn test_journal_venue_fallback() {
        assert_eq!(journal(&json!({ "journal": "Nature" })), "Nature");
        assert_eq!(journal(&json!({ "venue": "NeurIPS" })), "NeurIPS");
        assert_eq!(journal(&json!({})), "");
    }

    #[test]
    fn test_journal_and_venue_prefer_opposite_keys() {
        let both = json!({ "journal": "Nature", "venue": "NeurIPS" });
        assert_eq!(journal(&both), "Nature");
        assert_eq!(venue(&both), "NeurIPS");
        // Each still falls back to the other key
        assert_eq!(venue(&json!({ "journal": "Nature" })), "Nature");
    }

    #[test]
    fn test_doi_external_ids_fallback() {
        assert_eq!(doi(&json!({ "doi": "10.1/x" })), "10.1/x");
        assert_eq!(
            doi(&json!({ "externalIds": { "DOI": "10.2/y" } })),
            "10.2/y"
        );
        assert_eq!(doi(&json!({})), "");
    }

    #[test]
    fn test_raw_variants_empty_when_absent() {
        assert_eq!(title_raw(&json!({})), "");
        assert_eq!(year_raw(&json!({})), "");
        assert_eq!(title_raw(&json!({ "title": "X" })), "X");
        assert_eq!(year_raw(&json!({ "year": 1999 })), "1999");
    }

    #[test]
    fn test_year_raw_publication_year_fallback() {
        assert_eq!(year_raw(&json!({ "publicationYear": 2018 })), "2018");
        assert_eq!(
            year_raw(&json!({ "year": 2020, "publicationYear": 2018 })),
            "2020"
        );
    }

    #[test]
    fn test_malformed_fields_degrade_silently() {
        let r = json!({ "title": 42, "year": [2020], "author": 7 });
        assert_eq!(title(&r), UNTITLED);
        assert_eq!(year(&r), NO_DATE);
        assert_eq!(authors(&r), UNKNOWN_AUTHOR);
    }
}
