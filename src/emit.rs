//! Artifact Emission
//!
//! Fans the triaged rows out into the on-disk artifacts:
//! - classification listing (authoritative JSON array)
//! - policy-exception stubs for deny.toml
//! - remediation-command stubs
//! - tabular summary listing (extraction-stage output)
//!
//! Each artifact is built as a whole string and written in one call, so a
//! destination file is either the previous run's content or the new run's,
//! never a blend.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::classify::{bare_name, Classification, ClassifiedRow};
use crate::error::Result;
use crate::extract::SummaryRow;

pub const SUMMARY_TABLE_HEADER: &str = "advisory_id,package,code,message,severity,notes,parents";

/// One `[[exceptions]]` block in the deny.toml stub file
#[derive(Debug, Serialize)]
struct ExceptionEntry {
    package: String,
    reason: String,
    expires: String,
}

#[derive(Debug, Serialize)]
struct ExceptionBlock {
    exceptions: Vec<ExceptionEntry>,
}

/// Write the summary rows as a pretty-printed JSON array.
///
/// This is the hand-off artifact the classify stage consumes.
pub fn write_summary_json(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let content = serde_json::to_string_pretty(rows)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write the tabular summary listing.
pub fn write_summary_table(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str(SUMMARY_TABLE_HEADER);
    out.push('\n');

    for row in rows {
        let record = [
            table_field(row.advisory_id.as_deref().unwrap_or("")),
            table_field(row.package.as_deref().unwrap_or("")),
            table_field(&row.code),
            table_field(&row.message),
            table_field(row.severity.as_deref().unwrap_or("")),
            table_field(&row.notes),
            table_field(&row.parents),
        ]
        .join(",");
        out.push_str(&record);
        out.push('\n');
    }

    fs::write(path, out)?;
    Ok(())
}

/// Write the classified rows as a pretty-printed JSON array (the
/// authoritative output of the pipeline).
pub fn write_classification(path: &Path, rows: &[ClassifiedRow]) -> Result<()> {
    let content = serde_json::to_string_pretty(rows)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write one `[[exceptions]]` stub per accept-exception row with a known
/// package. Rows without a package get a flagged comment instead, so they
/// surface in review rather than vanishing.
pub fn write_exception_stubs(path: &Path, rows: &[ClassifiedRow], expiry_year: i32) -> Result<()> {
    let mut out = String::new();

    for classified in rows {
        if classified.classification != Classification::AcceptException {
            continue;
        }

        let advisory_id = classified.row.advisory_id.as_deref().unwrap_or("?");
        match classified.row.package.as_deref() {
            Some(package) => {
                let block = ExceptionBlock {
                    exceptions: vec![ExceptionEntry {
                        package: bare_name(package).to_string(),
                        reason: format!(
                            "Accept temporary exception for {}: {}",
                            advisory_id, classified.rationale
                        ),
                        expires: format!("{}-12-31", expiry_year),
                    }],
                };
                out.push_str(&toml::to_string(&block)?);
                out.push('\n');
            }
            None => {
                out.push_str(&format!(
                    "# Unknown package for advisory {}; manual review needed\n\n",
                    advisory_id
                ));
            }
        }
    }

    fs::write(path, out)?;
    Ok(())
}

/// Write the remediation-command stubs: an update suggestion per fix-locally
/// row and an escalation note per upstream-required row. Accept-exception
/// rows contribute nothing here.
pub fn write_remediation_stubs(path: &Path, rows: &[ClassifiedRow]) -> Result<()> {
    let mut out = String::new();

    for classified in rows {
        let package = match classified.row.package.as_deref() {
            Some(package) => bare_name(package),
            None => continue,
        };
        let advisory_id = classified.row.advisory_id.as_deref().unwrap_or("?");

        match classified.classification {
            Classification::FixLocally => {
                out.push_str(&format!("# Try: cargo update -p {}\n", package));
            }
            Classification::UpstreamRequired => {
                out.push_str(&format!(
                    "# Upstream required: open issue/PR to upgrade {} in the framework stack for advisory {}\n",
                    package, advisory_id
                ));
            }
            Classification::AcceptException => {}
        }
    }

    fs::write(path, out)?;
    Ok(())
}

/// Quote a field when it would break the comma-separated layout.
fn table_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
