//! Summary Extraction
//!
//! Normalizes one diagnostic plus its ancestor chain into a flat summary
//! row. Field derivation follows a fixed precedence and no absence ever
//! fails: every missing field resolves to a null or empty sentinel.

use serde::{Deserialize, Serialize};

use crate::graph::{ancestor_chain, GraphNode, WalkDiagnostics};
use crate::ingest::DiagnosticRecord;

/// Notes are a reviewer aid, not an archive
pub const MAX_NOTES: usize = 3;

/// One flattened diagnostic, ready for classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub advisory_id: Option<String>,
    /// `name@version`, or a bare name when the advisory only carries one
    pub package: Option<String>,
    pub code: String,
    pub message: String,
    pub severity: Option<String>,
    /// First [`MAX_NOTES`] notes, `"; "`-joined
    pub notes: String,
    /// Ancestor chain, `" | "`-joined
    pub parents: String,
}

/// Flatten one diagnostic into a summary row.
///
/// Precedence per field:
/// - `code`: explicit code, else the outer type tag, else empty
/// - `message`: explicit message, else the advisory title, else empty
/// - `package`: advisory package, else the first root graph entry's
///   `name@version`, else absent
/// - `advisory_id`: advisory id, else the first alias, else absent
pub fn summarize(record: &DiagnosticRecord, chain: &[String]) -> SummaryRow {
    let advisory = &record.fields.advisory;

    let code = non_empty(record.fields.code.as_deref())
        .or_else(|| non_empty(record.kind.as_deref()))
        .unwrap_or_default();

    let message = non_empty(record.message.as_deref())
        .or_else(|| non_empty(advisory.title.as_deref()))
        .unwrap_or_default();

    let package = non_empty(advisory.package.as_deref()).or_else(|| root_package(record));

    let advisory_id =
        non_empty(advisory.id.as_deref()).or_else(|| advisory.aliases.first().cloned());

    let notes = record
        .fields
        .notes
        .iter()
        .take(MAX_NOTES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ");

    SummaryRow {
        advisory_id,
        package,
        code,
        message,
        severity: record.fields.severity.clone(),
        notes,
        parents: chain.join(" | "),
    }
}

/// Walk and flatten every diagnostic, preserving input order.
pub fn summarize_all(
    records: &[DiagnosticRecord],
    diagnostics: &mut WalkDiagnostics,
) -> Vec<SummaryRow> {
    records
        .iter()
        .map(|record| {
            let chain = ancestor_chain(&record.fields.graphs, diagnostics);
            summarize(record, &chain)
        })
        .collect()
}

/// Package fallback: the first root graph entry, when it is a recognized
/// package node.
fn root_package(record: &DiagnosticRecord) -> Option<String> {
    match record.fields.graphs.first() {
        Some(GraphNode::Package(pkg)) => Some(pkg.krate.ident()),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(String::from)
}
