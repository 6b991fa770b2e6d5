//! Heuristic import extraction.
//!
//! Line-pattern matching, not parsing: the extractor trades accuracy for
//! zero setup cost, and both false positives and false negatives are
//! tolerated by contract. Results feed the graph as raw edge targets,
//! dangling when they resolve to nothing.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};

use super::language::Language;
use crate::error::Result;

/// Extracts raw imported-module identifiers from source text.
pub trait DependencyExtractor {
    fn extract(&self, content: &str, language: Language) -> Result<BTreeSet<String>>;
}

/// Regex-based extractor with per-language line patterns.
pub struct HeuristicExtractor {
    patterns: HashMap<Language, Vec<Regex>>,
}

impl HeuristicExtractor {
    /// Compile the pattern table. Fails only if a pattern is invalid.
    pub fn new() -> Result<Self> {
        let mut patterns: HashMap<Language, Vec<Regex>> = HashMap::new();

        patterns.insert(
            Language::Rust,
            compile(&[
                r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+([A-Za-z_][A-Za-z0-9_]*)",
                r"(?m)^\s*extern\s+crate\s+([A-Za-z_][A-Za-z0-9_]*)",
            ])?,
        );
        patterns.insert(
            Language::Python,
            compile(&[
                r"(?m)^\s*import\s+([\w.]+)",
                r"(?m)^\s*from\s+([\w.]+)\s+import\b",
            ])?,
        );
        let javascript = compile(&[
            r#"import\s+[\w{}*,\s]+\s+from\s+["']([^"']+)["']"#,
            r#"import\s*\(?\s*["']([^"']+)["']\s*\)?"#,
            r#"require\s*\(\s*["']([^"']+)["']\s*\)"#,
            r#"export\s+[\w{}*,\s]+\s+from\s+["']([^"']+)["']"#,
        ])?;
        patterns.insert(Language::TypeScript, javascript.clone());
        patterns.insert(Language::JavaScript, javascript);
        patterns.insert(
            Language::Go,
            compile(&[
                r#"(?m)^\s*import\s+(?:\w+\s+)?"([^"]+)""#,
                r#"(?m)^\s*(?:\w+\s+)?"([^"]+)"\s*$"#,
            ])?,
        );
        patterns.insert(
            Language::Java,
            compile(&[r"(?m)^\s*import\s+(?:static\s+)?([\w.]+?)(?:\.\*)?\s*;"])?,
        );
        patterns.insert(
            Language::CSharp,
            compile(&[r"(?m)^\s*using\s+(?:static\s+)?([\w.]+)\s*;"])?,
        );
        patterns.insert(
            Language::Ruby,
            compile(&[r#"(?m)^\s*require(?:_relative)?\s+["']([^"']+)["']"#])?,
        );
        patterns.insert(
            Language::Cpp,
            compile(&[r#"(?m)^\s*#\s*include\s*[<"]([^>"]+)[>"]"#])?,
        );

        Ok(Self { patterns })
    }
}

fn compile(sources: &[&str]) -> Result<Vec<Regex>> {
    sources.iter().map(|s| Ok(Regex::new(s)?)).collect()
}

/// Rust path keywords that name the current crate, not a dependency.
const RUST_PATH_KEYWORDS: &[&str] = &["crate", "self", "super"];

impl DependencyExtractor for HeuristicExtractor {
    fn extract(&self, content: &str, language: Language) -> Result<BTreeSet<String>> {
        let mut deps = BTreeSet::new();
        let Some(patterns) = self.patterns.get(&language) else {
            return Ok(deps);
        };
        for pattern in patterns {
            for captures in pattern.captures_iter(content) {
                if let Some(m) = captures.get(1) {
                    let dep = m.as_str();
                    if language == Language::Rust && RUST_PATH_KEYWORDS.contains(&dep) {
                        continue;
                    }
                    deps.insert(dep.to_string());
                }
            }
        }
        Ok(deps)
    }
}
