//! Remediation Classification
//!
//! A pure, ordered decision table mapping a summary row to a remediation
//! bucket plus a rationale string. First matching branch wins and the
//! decision is total. The hint-token lists live in [`PolicyConfig`] and are
//! injected at construction, so policy can track a different dependency
//! stack without touching the decision logic.
//!
//! The output is a triage suggestion for human review, never an automated
//! security verdict.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::config::PolicyConfig;
use crate::extract::SummaryRow;

/// Remediation bucket assigned to an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// The fix has to land in the upstream framework stack first
    UpstreamRequired,
    /// A direct dependency the workspace can bump itself
    FixLocally,
    /// Low impact or dev-time only; accept with a documented exception
    AcceptException,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpstreamRequired => write!(f, "upstream-required"),
            Self::FixLocally => write!(f, "fix-locally"),
            Self::AcceptException => write!(f, "accept-exception"),
        }
    }
}

/// A summary row plus its triage decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRow {
    #[serde(flatten)]
    pub row: SummaryRow,
    pub classification: Classification,
    pub rationale: String,
}

/// Classifies summary rows against an injected policy
pub struct Classifier {
    high_priority_codes: HashSet<String>,
    /// Lowercased for case-insensitive matching against the parents chain
    upstream_hints: Vec<String>,
    dev_hints: Vec<String>,
}

impl Classifier {
    pub fn new(policy: &PolicyConfig) -> Self {
        Self {
            high_priority_codes: policy.high_priority_codes.iter().cloned().collect(),
            upstream_hints: policy
                .upstream_hints
                .iter()
                .map(|h| h.to_lowercase())
                .collect(),
            dev_hints: policy.dev_hints.clone(),
        }
    }

    /// Classify all rows, preserving order
    pub fn classify_all(&self, rows: &[SummaryRow]) -> Vec<ClassifiedRow> {
        rows.iter().map(|row| self.classify(row)).collect()
    }

    /// Classify a single row. Pure: identical rows always produce the
    /// identical classification and rationale.
    pub fn classify(&self, row: &SummaryRow) -> ClassifiedRow {
        let bare = row.package.as_deref().map(bare_name);
        let in_upstream_chain = self.parents_hit(&row.parents);

        let (classification, rationale) = if self.high_priority_codes.contains(&row.code) {
            if in_upstream_chain {
                (
                    Classification::UpstreamRequired,
                    "transitively introduced via the framework dependency stack",
                )
            } else if bare.is_some_and(|pkg| self.dev_hints.iter().any(|d| d == pkg)) {
                (
                    Classification::AcceptException,
                    "dev-time crate; likely safe to accept with exception or replace",
                )
            } else {
                (
                    Classification::FixLocally,
                    "appears to be directly addressable in the workspace",
                )
            }
        } else if bare.is_some_and(|pkg| self.dev_hints.iter().any(|d| pkg.contains(d.as_str()))) {
            (
                Classification::AcceptException,
                "dev-time/cli/proc-macro; suggest exception or replacement when time permits",
            )
        } else if in_upstream_chain {
            (
                Classification::UpstreamRequired,
                "transitively introduced via the framework dependency stack",
            )
        } else {
            (
                Classification::AcceptException,
                "low-impact or informational; accept with documented justification",
            )
        };

        ClassifiedRow {
            row: row.clone(),
            classification,
            rationale: rationale.to_string(),
        }
    }

    fn parents_hit(&self, parents: &str) -> bool {
        let haystack = parents.to_lowercase();
        self.upstream_hints
            .iter()
            .any(|hint| haystack.contains(hint.as_str()))
    }
}

/// The package name before any `@version` suffix
pub fn bare_name(package: &str) -> &str {
    package.split('@').next().unwrap_or(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, package: Option<&str>, parents: &str) -> SummaryRow {
        SummaryRow {
            advisory_id: Some("RUSTSEC-2024-0001".to_string()),
            package: package.map(String::from),
            code: code.to_string(),
            message: String::new(),
            severity: None,
            notes: String::new(),
            parents: parents.to_string(),
        }
    }

    fn classifier() -> Classifier {
        Classifier::new(&PolicyConfig::default())
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(bare_name("foo@1.0.0"), "foo");
        assert_eq!(bare_name("foo"), "foo");
    }

    #[test]
    fn test_high_priority_upstream_chain_wins_over_package_name() {
        let c = classifier();
        // dev-tooling package name, but the chain says upstream
        let classified = c.classify(&row(
            "vulnerability",
            Some("paste@1.0"),
            "paste@1.0 | Anchor-Lang@0.29",
        ));
        assert_eq!(classified.classification, Classification::UpstreamRequired);
        assert!(classified.rationale.contains("framework dependency stack"));
    }

    #[test]
    fn test_high_priority_dev_tooling_exact_match() {
        let c = classifier();
        let classified = c.classify(&row("unsound", Some("paste@1.0.15"), "other@1.0"));
        assert_eq!(classified.classification, Classification::AcceptException);
        assert!(classified.rationale.contains("dev-time crate"));
    }

    #[test]
    fn test_high_priority_default_is_fix_locally() {
        let c = classifier();
        let classified = c.classify(&row("vulnerability", Some("some-dep@0.3"), "other@1.0"));
        assert_eq!(classified.classification, Classification::FixLocally);
        assert!(classified.rationale.contains("directly addressable"));
    }

    #[test]
    fn test_low_priority_dev_tooling_substring_match() {
        let c = classifier();
        // "syn" matches "unsynced-helper" as a substring in the low branch
        let classified = c.classify(&row("unmaintained", Some("unsynced-helper@2.0"), ""));
        assert_eq!(classified.classification, Classification::AcceptException);
        assert!(classified.rationale.contains("when time permits"));
    }

    #[test]
    fn test_low_priority_upstream_chain() {
        let c = classifier();
        let classified = c.classify(&row("unmaintained", Some("some-dep@0.3"), "spl-token@4.0"));
        assert_eq!(classified.classification, Classification::UpstreamRequired);
    }

    #[test]
    fn test_low_priority_default_accepts_with_justification() {
        let c = classifier();
        let classified = c.classify(&row("unmaintained", Some("quiet-crate@0.1"), ""));
        assert_eq!(classified.classification, Classification::AcceptException);
        assert!(classified.rationale.contains("documented justification"));
    }

    #[test]
    fn test_missing_package_never_panics() {
        let c = classifier();
        let classified = c.classify(&row("vulnerability", None, ""));
        assert_eq!(classified.classification, Classification::FixLocally);

        let classified = c.classify(&row("unmaintained", None, ""));
        assert_eq!(classified.classification, Classification::AcceptException);
    }

    #[test]
    fn test_deterministic() {
        let c = classifier();
        let input = row("vulnerability", Some("some-dep@0.3"), "borsh@0.10");
        let a = c.classify(&input);
        let b = c.classify(&input);
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.rationale, b.rationale);
    }

    #[test]
    fn test_policy_is_injected_not_hardcoded() {
        let policy = PolicyConfig {
            high_priority_codes: vec!["vulnerability".to_string()],
            upstream_hints: vec!["acme-framework".to_string()],
            dev_hints: vec!["linter".to_string()],
            expiry_year: 2026,
        };
        let c = Classifier::new(&policy);

        let classified = c.classify(&row(
            "vulnerability",
            Some("dep@1.0"),
            "dep@1.0 | Acme-Framework@2.0",
        ));
        assert_eq!(classified.classification, Classification::UpstreamRequired);

        // the default upstream hints no longer apply under the custom policy
        let classified = c.classify(&row("vulnerability", Some("dep@1.0"), "solana-core@1.14"));
        assert_eq!(classified.classification, Classification::FixLocally);
    }

    #[test]
    fn test_classification_serializes_kebab_case() {
        let json = serde_json::to_string(&Classification::UpstreamRequired).unwrap();
        assert_eq!(json, "\"upstream-required\"");
        assert_eq!(Classification::AcceptException.to_string(), "accept-exception");
    }
}
