//! Ancestor-Chain Walking
//!
//! Flattens a diagnostic's graph roots into the ordered list of
//! `name@version` identifiers that transitively pull in the vulnerable
//! package. The walk never fails: an unrecognized node shape drops that
//! branch (recorded as a structured warning) and the walk continues with
//! its siblings.

use super::diagnostics::WalkDiagnostics;
use super::GraphNode;

/// Rendered chains are capped for human scanning, not completeness.
pub const MAX_CHAIN_LEN: usize = 6;

/// Recursion cap. The input is trusted tool output and cargo-deny chains are
/// shallow, but a cyclic or adversarial payload must not blow the stack.
const MAX_WALK_DEPTH: usize = 32;

/// Flatten the `graphs` array of one diagnostic into an ancestor chain.
///
/// Roots are walked in array order and their chains concatenated; the
/// combined result is truncated to the first [`MAX_CHAIN_LEN`] identifiers.
/// An absent or empty `graphs` array yields an empty chain.
pub fn ancestor_chain(graphs: &[GraphNode], diagnostics: &mut WalkDiagnostics) -> Vec<String> {
    let mut chain = Vec::new();

    for (idx, node) in graphs.iter().enumerate() {
        walk_node(node, &format!("graphs[{}]", idx), 0, &mut chain, diagnostics);
    }

    chain.truncate(MAX_CHAIN_LEN);
    chain
}

fn walk_node(
    node: &GraphNode,
    location: &str,
    depth: usize,
    chain: &mut Vec<String>,
    diagnostics: &mut WalkDiagnostics,
) {
    if depth >= MAX_WALK_DEPTH {
        diagnostics.depth_capped(location);
        return;
    }

    match node {
        GraphNode::Package(pkg) => {
            chain.push(pkg.krate.ident());
            for (idx, parent) in pkg.parents.iter().enumerate() {
                walk_node(
                    parent,
                    &format!("{}.parents[{}]", location, idx),
                    depth + 1,
                    chain,
                    diagnostics,
                );
            }
        }
        GraphNode::Unrecognized(value) => {
            diagnostics.dropped_branch(location, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(json: &str) -> Vec<GraphNode> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_graphs_yield_empty_chain() {
        let mut diags = WalkDiagnostics::new();
        let chain = ancestor_chain(&[], &mut diags);
        assert!(chain.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_chain_follows_parents_in_order() {
        let graphs = nodes(
            r#"[{"Krate":{"name":"foo-crate","version":"1.0"},
                "parents":[{"Krate":{"name":"framework-core","version":"1.14"}}]}]"#,
        );
        let mut diags = WalkDiagnostics::new();
        let chain = ancestor_chain(&graphs, &mut diags);
        assert_eq!(chain, vec!["foo-crate@1.0", "framework-core@1.14"]);
    }

    #[test]
    fn test_roots_concatenate_in_array_order() {
        let graphs = nodes(
            r#"[{"Krate":{"name":"a","version":"1"}},
                {"Krate":{"name":"b","version":"2"},
                 "parents":[{"Krate":{"name":"c","version":"3"}}]}]"#,
        );
        let mut diags = WalkDiagnostics::new();
        let chain = ancestor_chain(&graphs, &mut diags);
        assert_eq!(chain, vec!["a@1", "b@2", "c@3"]);
    }

    #[test]
    fn test_unrecognized_branch_is_skipped_not_fatal() {
        let graphs = nodes(
            r#"[{"Krate":{"name":"a","version":"1"},
                 "parents":[{"bogus":true},
                            {"Krate":{"name":"b","version":"2"}}]}]"#,
        );
        let mut diags = WalkDiagnostics::new();
        let chain = ancestor_chain(&graphs, &mut diags);
        assert_eq!(chain, vec!["a@1", "b@2"]);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_unrecognized_root_skips_to_sibling() {
        let graphs = nodes(r#"["not a node", {"Krate":{"name":"a","version":"1"}}]"#);
        let mut diags = WalkDiagnostics::new();
        let chain = ancestor_chain(&graphs, &mut diags);
        assert_eq!(chain, vec!["a@1"]);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_chain_truncated_to_cap() {
        let mut json = String::from(r#"{"Krate":{"name":"p0","version":"0"},"parents":["#);
        for i in 1..10 {
            json.push_str(&format!(
                r#"{{"Krate":{{"name":"p{}","version":"{}"}}}},"#,
                i, i
            ));
        }
        json.pop();
        json.push_str("]}");

        let graphs = vec![serde_json::from_str(&json).unwrap()];
        let mut diags = WalkDiagnostics::new();
        let chain = ancestor_chain(&graphs, &mut diags);
        assert_eq!(chain.len(), MAX_CHAIN_LEN);
        assert_eq!(chain[0], "p0@0");
    }
}
