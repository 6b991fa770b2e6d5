//! Analyzer configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level ArchLens configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Source-walking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions (without dots) included in the scan.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory names to skip, in addition to the built-in list and
    /// anything starting with a dot.
    #[serde(default)]
    pub ignore_dirs: Vec<String>,
}

/// Metrics engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many entries the top-by-centrality lists carry.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Betweenness is skipped (and reported as not computed) above this
    /// node count — the all-pairs path enumeration is quadratic.
    #[serde(default = "default_betweenness_node_limit")]
    pub betweenness_node_limit: usize,
}

fn default_extensions() -> Vec<String> {
    [
        "rs", "py", "pyi", "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "go", "java", "cs",
        "rb", "cpp", "cc", "cxx", "hpp", "c", "h",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_top_n() -> usize {
    10
}

fn default_betweenness_node_limit() -> usize {
    2000
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_dirs: Vec::new(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            betweenness_node_limit: default_betweenness_node_limit(),
        }
    }
}

impl AnalyzerConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AnalyzerConfig::default();
        assert!(config.scan.extensions.iter().any(|e| e == "rs"));
        assert!(config.scan.ignore_dirs.is_empty());
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.analysis.betweenness_node_limit, 2000);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AnalyzerConfig = toml::from_str(
            r#"
            [analysis]
            top_n = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.analysis.betweenness_node_limit, 2000);
        assert!(!config.scan.extensions.is_empty());
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let config = AnalyzerConfig::load(Path::new("/does/not/exist.toml"));
        assert_eq!(config.analysis.top_n, 10);
    }
}
