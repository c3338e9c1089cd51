// ============================================================
// Layer 4: Corpus File Loader
// ============================================================
// Reads raw corpus files from disk into serde record types.
//
// Two layouts are supported:
//   - JSON Lines: one record per line (TriviaQA exports).
//     A bad line is logged and skipped; one broken record
//     never aborts a load of hundreds of thousands.
//   - Single JSON document (SQuAD files).
//
// A missing file is an error: a mistyped corpus directory must
// not quietly prepare empty splits.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::Path,
};

/// Read every parseable record from a JSON Lines file.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open corpus file '{}'", path.display()))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line
            .with_context(|| format!("Cannot read line {} of '{}'", line_no + 1, path.display()))?;

        // Tolerate blank lines, e.g. a trailing newline
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping line {} of '{}': {}", line_no + 1, path.display(), e);
            }
        }
    }

    tracing::info!(
        "Loaded {} records from '{}' ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );
    Ok(records)
}

/// Read a whole JSON document.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read corpus file '{}'", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("Malformed JSON in '{}'", path.display()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_json_lines_and_skips_bad_lines() {
        let dir  = TempDir::new().unwrap();
        let path = temp_file(&dir, "rows.jsonl", "{\"id\": 1}\nnot json\n\n{\"id\": 2}\n");
        let rows: Vec<Row> = read_json_lines(&path).unwrap();
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn test_missing_json_lines_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = read_json_lines::<Row>(&dir.path().join("missing.jsonl")).unwrap_err();
        assert!(err.to_string().contains("missing.jsonl"));
    }

    #[test]
    fn test_reads_json_document() {
        let dir  = TempDir::new().unwrap();
        let path = temp_file(&dir, "doc.json", "{\"id\": 7}");
        let row: Row = read_json_file(&path).unwrap();
        assert_eq!(row, Row { id: 7 });
    }

    #[test]
    fn test_missing_json_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_json_file::<Row>(&dir.path().join("dev-v1.1.json")).is_err());
    }

    #[test]
    fn test_malformed_json_document_is_an_error() {
        let dir  = TempDir::new().unwrap();
        let path = temp_file(&dir, "broken.json", "{\"id\": ");
        assert!(read_json_file::<Row>(&path).is_err());
    }
}
