//! Advisory Dependency Graph
//!
//! Models the nested "who depends on the vulnerable package" structure that
//! cargo-deny attaches to each diagnostic, and flattens it into the ordered
//! ancestor chain shown to reviewers.
//!
//! Nodes are an explicit recursive tagged variant rather than untyped JSON
//! maps: a recognized package node carries its `Krate` payload plus further
//! parent nodes, and anything else falls into `Unrecognized` so the walk can
//! skip that branch without aborting.

pub mod diagnostics;
pub mod walk;

// Re-export key types from submodules
pub use diagnostics::{WalkDiagnostics, WalkIssue, WalkIssueCode};
pub use walk::{ancestor_chain, MAX_CHAIN_LEN};

use serde::Deserialize;

/// One node in a diagnostic's dependency graph.
///
/// Deserialization is untagged: a value either matches the package shape or
/// is captured verbatim for the walker to report and skip.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GraphNode {
    Package(PackageNode),
    Unrecognized(serde_json::Value),
}

/// A recognized package node: the crate itself plus the packages that
/// depend on it.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageNode {
    #[serde(rename = "Krate")]
    pub krate: Krate,

    #[serde(default)]
    pub parents: Vec<GraphNode>,
}

/// Package identity as reported by cargo-deny
#[derive(Debug, Clone, Deserialize)]
pub struct Krate {
    pub name: String,
    pub version: String,
}

impl Krate {
    /// The `name@version` identifier used throughout the triage artifacts
    pub fn ident(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_node_deserializes() {
        let node: GraphNode = serde_json::from_str(
            r#"{"Krate":{"name":"foo","version":"1.0"},"parents":[{"Krate":{"name":"bar","version":"2.0"}}]}"#,
        )
        .unwrap();

        match node {
            GraphNode::Package(pkg) => {
                assert_eq!(pkg.krate.ident(), "foo@1.0");
                assert_eq!(pkg.parents.len(), 1);
            }
            other => panic!("Expected Package, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_shape_is_captured() {
        let node: GraphNode =
            serde_json::from_str(r#"{"Crate":{"name":"typo-tag"}}"#).unwrap();
        assert!(matches!(node, GraphNode::Unrecognized(_)));

        let node: GraphNode = serde_json::from_str("42").unwrap();
        assert!(matches!(node, GraphNode::Unrecognized(_)));
    }

    #[test]
    fn test_krate_missing_version_is_unrecognized() {
        let node: GraphNode = serde_json::from_str(r#"{"Krate":{"name":"foo"}}"#).unwrap();
        assert!(matches!(node, GraphNode::Unrecognized(_)));
    }
}
