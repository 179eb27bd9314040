//! Advisory Triage
//!
//! A rule-based triage pipeline for cargo-deny advisory diagnostics: raw
//! NDJSON tool output in, a human-reviewable classification and remediation
//! plan out.
//!
//! ## Features
//!
//! - **Diagnostic Ingestion**: NDJSON parsing with one level of
//!   malformed-line recovery (backtick stripping)
//! - **Ancestor Chains**: recursive dependency-graph flattening, tolerant of
//!   unrecognized node shapes
//! - **Rule-Based Classification**: an ordered decision table driven by
//!   configurable hint-token policy
//! - **Remediation Artifacts**: classification listing, deny.toml exception
//!   stubs, and cargo-update command stubs
//!
//! ## Architecture
//!
//! ```text
//! cargo-deny-advisories.json (NDJSON)
//!   │  triage-extract
//!   ├─► cargo-deny-triage.json      (summary rows)
//!   ├─► cargo-deny-triage.csv       (tabular listing)
//!   │  triage-classify
//!   ├─► cargo-deny-classification.json
//!   ├─► deny-suggestions.toml
//!   └─► cargo-update-cmds.txt
//! ```
//!
//! The pipeline is a single-threaded batch pass: it either completes and
//! writes its artifacts or aborts before writing any of them. Its output is
//! a triage suggestion for human review, not a security verdict.

pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod graph;
pub mod ingest;

pub use classify::{bare_name, Classification, ClassifiedRow, Classifier};
pub use config::{ArtifactsConfig, PathsConfig, PolicyConfig, TriageConfig};
pub use error::{Result, TriageError};
pub use extract::{summarize, summarize_all, SummaryRow};
pub use graph::{ancestor_chain, GraphNode, Krate, PackageNode, WalkDiagnostics};
pub use ingest::{read_ndjson, read_summary, Advisory, DiagnosticFields, DiagnosticRecord};
