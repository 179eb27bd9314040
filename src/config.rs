//! Configuration management for the triage pipeline
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (triage.toml)
//! - Environment variables (TRIAGE_*)
//!
//! ## Example config file (triage.toml):
//! ```toml
//! [paths]
//! input = "cargo-deny-advisories.json"
//! out_dir = "triage"
//!
//! [artifacts]
//! classification = "cargo-deny-classification.json"
//!
//! [policy]
//! upstream_hints = ["solana-", "anchor-", "borsh"]
//! dev_hints = ["paste", "proc-macro2", "syn"]
//! expiry_year = 2026
//! ```

use chrono::{Datelike, Utc};
use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the triage pipeline
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriageConfig {
    /// Input/output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Artifact file names (relative to the output directory)
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Classification policy
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Input/output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to the cargo-deny NDJSON advisory report
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory the triage artifacts are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

/// Artifact file names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Summary rows as a JSON array (consumed by the classify stage)
    #[serde(default = "default_summary_json")]
    pub summary_json: String,

    /// Summary rows as a tabular listing
    #[serde(default = "default_summary_table")]
    pub summary_table: String,

    /// Classified rows as a JSON array (authoritative output)
    #[serde(default = "default_classification")]
    pub classification: String,

    /// deny.toml exception stubs
    #[serde(default = "default_exceptions")]
    pub exceptions: String,

    /// Remediation command stubs
    #[serde(default = "default_remediation")]
    pub remediation: String,
}

/// Classification policy: the hint-token lists the decision table consults.
///
/// These are configuration, not constants, so the policy can track a new
/// dependency stack without touching the decision logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Diagnostic codes that demand an actual fix rather than an exception
    #[serde(default = "default_high_priority_codes")]
    pub high_priority_codes: Vec<String>,

    /// Tokens that mark an ancestor chain as part of the upstream
    /// framework stack (matched case-insensitively as substrings)
    #[serde(default = "default_upstream_hints")]
    pub upstream_hints: Vec<String>,

    /// Crates that only matter at development time (exact bare-name match
    /// for high-priority codes, substring match otherwise)
    #[serde(default = "default_dev_hints")]
    pub dev_hints: Vec<String>,

    /// Year used for the `expires` field of generated exception stubs
    #[serde(default = "default_expiry_year")]
    pub expiry_year: i32,
}

// Default value functions
fn default_input() -> PathBuf {
    PathBuf::from("cargo-deny-advisories.json")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("triage")
}

fn default_summary_json() -> String {
    "cargo-deny-triage.json".to_string()
}

fn default_summary_table() -> String {
    "cargo-deny-triage.csv".to_string()
}

fn default_classification() -> String {
    "cargo-deny-classification.json".to_string()
}

fn default_exceptions() -> String {
    "deny-suggestions.toml".to_string()
}

fn default_remediation() -> String {
    "cargo-update-cmds.txt".to_string()
}

fn default_high_priority_codes() -> Vec<String> {
    vec!["vulnerability".to_string(), "unsound".to_string()]
}

fn default_upstream_hints() -> Vec<String> {
    [
        "solana-",
        "anchor-",
        "spl-",
        "solana",
        "anchor",
        "ed25519-dalek",
        "curve25519-dalek",
        "borsh",
        "ring",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_dev_hints() -> Vec<String> {
    [
        "ansi_term",
        "atty",
        "derivative",
        "paste",
        "proc-macro-error",
        "proc-macro2",
        "syn",
        "env_logger",
        "clap",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_expiry_year() -> i32 {
    Utc::now().year()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            out_dir: default_out_dir(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            summary_json: default_summary_json(),
            summary_table: default_summary_table(),
            classification: default_classification(),
            exceptions: default_exceptions(),
            remediation: default_remediation(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            high_priority_codes: default_high_priority_codes(),
            upstream_hints: default_upstream_hints(),
            dev_hints: default_dev_hints(),
            expiry_year: default_expiry_year(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["triage.toml", ".triage.toml", "config/triage.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "triage") {
            let xdg_config = config_dir.config_dir().join("triage.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (TRIAGE_*)
        builder = builder.add_source(
            Environment::with_prefix("TRIAGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Path of the summary JSON artifact
    pub fn summary_json_path(&self) -> PathBuf {
        self.paths.out_dir.join(&self.artifacts.summary_json)
    }

    /// Path of the tabular summary artifact
    pub fn summary_table_path(&self) -> PathBuf {
        self.paths.out_dir.join(&self.artifacts.summary_table)
    }

    /// Path of the classification JSON artifact
    pub fn classification_path(&self) -> PathBuf {
        self.paths.out_dir.join(&self.artifacts.classification)
    }

    /// Path of the exception-stub artifact
    pub fn exceptions_path(&self) -> PathBuf {
        self.paths.out_dir.join(&self.artifacts.exceptions)
    }

    /// Path of the remediation-stub artifact
    pub fn remediation_path(&self) -> PathBuf {
        self.paths.out_dir.join(&self.artifacts.remediation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TriageConfig::default();
        assert_eq!(config.paths.out_dir, PathBuf::from("triage"));
        assert!(config
            .policy
            .high_priority_codes
            .contains(&"vulnerability".to_string()));
        assert!(config.policy.dev_hints.contains(&"paste".to_string()));
        assert!(config.policy.expiry_year >= 2025);
    }

    #[test]
    fn test_artifact_paths_join_out_dir() {
        let config = TriageConfig::default();
        assert_eq!(
            config.classification_path(),
            PathBuf::from("triage/cargo-deny-classification.json")
        );
        assert_eq!(
            config.exceptions_path(),
            PathBuf::from("triage/deny-suggestions.toml")
        );
    }

    #[test]
    fn test_serialize_config() {
        let config = TriageConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("[policy]"));
    }
}
