//! Walk Diagnostics
//!
//! Collects structured warnings for anomalies absorbed during the ancestor
//! walk. Dropped branches can hide real dependency-path data, so every skip
//! is recorded and surfaced to the reviewer instead of silently discarded;
//! none of them ever aborts the walk.

use serde::Serialize;
use std::fmt;

/// Longest rendered preview of a dropped node, in characters
const PREVIEW_LEN: usize = 60;

/// Warning code for categorizing walk anomalies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WalkIssueCode {
    /// A graph node did not match the recognized package shape
    GraphShapeMismatch,
    /// The recursion cap was reached before the branch bottomed out
    DepthCapExceeded,
}

impl WalkIssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GraphShapeMismatch => "W001",
            Self::DepthCapExceeded => "W002",
        }
    }
}

impl fmt::Display for WalkIssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded walk anomaly
#[derive(Debug, Clone, Serialize)]
pub struct WalkIssue {
    pub code: WalkIssueCode,
    /// Index path into the diagnostic's graphs array,
    /// e.g. `graphs[2].parents[0]`
    pub location: String,
    pub message: String,
}

impl fmt::Display for WalkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.location, self.message)
    }
}

/// Collection of anomalies from one or more walks
#[derive(Debug, Clone, Default)]
pub struct WalkDiagnostics {
    items: Vec<WalkIssue>,
}

impl WalkDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unrecognized node shape
    pub fn dropped_branch(&mut self, location: &str, value: &serde_json::Value) {
        let preview = preview(value);
        tracing::warn!(location, %preview, "dropped unrecognized graph branch");
        self.items.push(WalkIssue {
            code: WalkIssueCode::GraphShapeMismatch,
            location: location.to_string(),
            message: format!("unrecognized node shape: {}", preview),
        });
    }

    /// Record a branch cut off by the recursion cap
    pub fn depth_capped(&mut self, location: &str) {
        tracing::warn!(location, "graph walk depth cap reached");
        self.items.push(WalkIssue {
            code: WalkIssueCode::DepthCapExceeded,
            location: location.to_string(),
            message: "recursion depth cap reached; remainder of branch dropped".to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn all(&self) -> &[WalkIssue] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a WalkDiagnostics {
    type Item = &'a WalkIssue;
    type IntoIter = std::slice::Iter<'a, WalkIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn preview(value: &serde_json::Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > PREVIEW_LEN {
        let truncated: String = rendered.chars().take(PREVIEW_LEN).collect();
        format!("{}...", truncated)
    } else {
        rendered
    }
}
