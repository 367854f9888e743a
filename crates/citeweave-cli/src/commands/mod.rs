//! One module per pipeline stage. Each stage reads and writes files under
//! the configured artifact layout and is safe to re-run (outputs are
//! overwritten, never appended).

pub mod diagram;
pub mod extract;
pub mod fetch;
pub mod format;
pub mod run;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use citeweave_common::{CiteweaveError, Result};

/// Read a JSON artifact; a missing file is a `MissingArtifact` error so the
/// caller can tell "not produced yet" apart from a parse failure.
pub(crate) fn read_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(CiteweaveError::MissingArtifact(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub(crate) fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_missing_file() {
        let err = read_json(Path::new("/nonexistent/refs.json")).unwrap_err();
        assert!(matches!(err, CiteweaveError::MissingArtifact(_)));
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        write_json_pretty(&path, &serde_json::json!({ "ok": true })).unwrap();
        let back = read_json(&path).unwrap();
        assert_eq!(back["ok"], true);
    }
}
