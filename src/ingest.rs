//! Diagnostic Ingestion
//!
//! Reads a cargo-deny NDJSON advisory report into an ordered list of
//! diagnostic records. Reports captured from terminals sometimes arrive with
//! lines fenced in backticks, so a line that fails to parse is stripped and
//! retried once; a line that still fails aborts the whole run, because
//! classification assumes a complete record set.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, TriageError};
use crate::graph::GraphNode;

/// One parsed diagnostic line from the advisory report.
///
/// Every field is optional: a structurally sparse diagnostic still yields a
/// summary row, with absences resolved downstream by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticRecord {
    /// Outer type tag (e.g. "diagnostic")
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Top-level human-readable message
    #[serde(default)]
    pub message: Option<String>,

    /// Structured payload
    #[serde(default)]
    pub fields: DiagnosticFields,
}

/// The `fields` block of a diagnostic
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticFields {
    /// Diagnostic code (e.g. "vulnerability", "unmaintained")
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub advisory: Advisory,

    /// Dependency-graph roots: who pulls in the vulnerable package
    #[serde(default)]
    pub graphs: Vec<GraphNode>,

    #[serde(default)]
    pub notes: Vec<String>,
}

/// The advisory entry describing the vulnerable dependency
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Advisory {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub package: Option<String>,

    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Read a newline-delimited JSON advisory report.
///
/// Blank lines are skipped. Line numbers in errors are 1-based. A missing
/// file is reported before any parsing is attempted.
pub fn read_ndjson(path: &Path) -> Result<Vec<DiagnosticRecord>> {
    if !path.exists() {
        return Err(TriageError::MissingInput(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let record = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                let cleaned = line.trim_matches('`');
                match serde_json::from_str(cleaned) {
                    Ok(record) => {
                        tracing::debug!(line = idx + 1, "parsed after stripping backticks");
                        record
                    }
                    Err(_) => {
                        return Err(TriageError::MalformedRecord {
                            line: idx + 1,
                            source: err,
                        })
                    }
                }
            }
        };

        records.push(record);
    }

    Ok(records)
}

/// Read the summary-row artifact produced by the extract stage.
pub fn read_summary(path: &Path) -> Result<Vec<crate::extract::SummaryRow>> {
    if !path.exists() {
        return Err(TriageError::MissingInput(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_row_count_matches_non_blank_lines() {
        let file = write_temp(
            "{\"type\":\"diagnostic\"}\n\n{\"message\":\"m\"}\n   \n{\"fields\":{}}\n",
        );
        let records = read_ndjson(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_order_preserved() {
        let file = write_temp(
            "{\"message\":\"first\"}\n{\"message\":\"second\"}\n{\"message\":\"third\"}\n",
        );
        let records = read_ndjson(file.path()).unwrap();
        let messages: Vec<_> = records
            .iter()
            .map(|r| r.message.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_backtick_wrapped_line_recovers() {
        let file = write_temp("`{\"fields\":{\"code\":\"vulnerability\"}}`\n");
        let records = read_ndjson(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields.code.as_deref(), Some("vulnerability"));
    }

    #[test]
    fn test_malformed_line_reports_one_based_number() {
        let file = write_temp("{\"type\":\"diagnostic\"}\n{not json at all\n");
        let err = read_ndjson(file.path()).unwrap_err();
        match err {
            TriageError::MalformedRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_distinct() {
        let err = read_ndjson(Path::new("does/not/exist.json")).unwrap_err();
        match err {
            TriageError::MissingInput(path) => {
                assert_eq!(path, Path::new("does/not/exist.json"))
            }
            other => panic!("Expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn test_sparse_diagnostic_parses() {
        let file = write_temp("{}\n");
        let records = read_ndjson(file.path()).unwrap();
        assert!(records[0].kind.is_none());
        assert!(records[0].fields.graphs.is_empty());
        assert!(records[0].fields.advisory.id.is_none());
    }
}
