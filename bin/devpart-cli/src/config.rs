// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI configuration loaded from TOML files.
//!
//! # TOML Format
//! ```toml
//! graph = "./graphs/resnet.json"
//! level = "greedy"
//! output = "./clusters.json"
//! ```
//!
//! Every field is optional; present fields override the matching
//! command-line flags.

use std::path::{Path, PathBuf};

/// Partial configuration for the `devpart` CLI.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CliConfig {
    /// Path to the graph manifest.
    pub graph: Option<PathBuf>,
    /// Optimization level name: `"none"`, `"greedy"`, `"optimal"`.
    pub level: Option<String>,
    /// Output path for the clustering JSON.
    pub output: Option<PathBuf>,
}

impl CliConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config '{}': {e}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).map_err(|e| anyhow::anyhow!("TOML parse error: {e}"))
    }

    /// Applies this config over the command-line values.
    pub fn merge(
        self,
        graph: PathBuf,
        level: String,
        out: Option<PathBuf>,
    ) -> (PathBuf, String, Option<PathBuf>) {
        (
            self.graph.unwrap_or(graph),
            self.level.unwrap_or(level),
            self.output.or(out),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let cfg = CliConfig::from_toml(
            r#"
            graph = "./g.json"
            level = "none"
            output = "./out.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.level.as_deref(), Some("none"));
        assert_eq!(cfg.graph, Some(PathBuf::from("./g.json")));
    }

    #[test]
    fn test_parse_empty_is_all_none() {
        let cfg = CliConfig::from_toml("").unwrap();
        assert!(cfg.graph.is_none());
        assert!(cfg.level.is_none());
        assert!(cfg.output.is_none());
    }

    #[test]
    fn test_merge_prefers_config() {
        let cfg = CliConfig {
            graph: None,
            level: Some("none".into()),
            output: None,
        };
        let (graph, level, out) =
            cfg.merge(PathBuf::from("cli.json"), "greedy".into(), None);
        assert_eq!(graph, PathBuf::from("cli.json"));
        assert_eq!(level, "none");
        assert!(out.is_none());
    }

    #[test]
    fn test_bad_toml() {
        assert!(CliConfig::from_toml("graph = [").is_err());
    }
}
