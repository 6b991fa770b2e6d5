//! Source scanning — the external collaborators the graph builder
//! consumes.
//!
//! The core never touches storage directly: it sees a [`SourceWalker`]
//! producing `(path, content)` pairs and a [`DependencyExtractor`]
//! producing raw import strings. [`FsWalker`] and
//! [`imports::HeuristicExtractor`] are the shipped implementations.

pub mod imports;
pub mod language;

pub use imports::{DependencyExtractor, HeuristicExtractor};
pub use language::Language;

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::ScanConfig;
use crate::error::{ArchLensError, Result};

/// One scanned file: path relative to the scan root, plus its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// A finite, restartable source of `(path, content)` pairs.
///
/// Each call to `walk` starts a fresh iteration, which is what lets the
/// builder make separate node and edge passes over the same tree.
pub trait SourceWalker {
    fn walk(&self) -> Box<dyn Iterator<Item = SourceFile> + '_>;
}

/// Directories that are never scanned, even without .gitignore.
const BUILTIN_IGNORE: &[&str] = &[
    "node_modules",
    "vendor",
    "dist",
    "build",
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".tox",
    ".venv",
    "venv",
    "env",
    ".env",
    "target",
    ".next",
    ".nuxt",
    "coverage",
    ".cache",
    ".turbo",
    ".output",
];

/// Filesystem walker built on the `ignore` crate.
///
/// Respects .gitignore, skips hidden entries, the built-in ignore list,
/// and any configured extra directories; yields only files whose
/// extension is on the allow-list and that read cleanly as UTF-8.
pub struct FsWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_dirs: Vec<String>,
}

impl FsWalker {
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ArchLensError::InvalidRoot(root));
        }
        Ok(Self {
            root,
            extensions: config.extensions.clone(),
            ignore_dirs: config.ignore_dirs.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if a path contains any ignored directory component.
    fn is_ignored(&self, path: &Path) -> bool {
        path.components().any(|c| {
            if let std::path::Component::Normal(name) = c {
                let name = name.to_str().unwrap_or("");
                name.starts_with('.')
                    || BUILTIN_IGNORE.contains(&name)
                    || self.ignore_dirs.iter().any(|d| d == name)
            } else {
                false
            }
        })
    }

    fn is_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

impl SourceWalker for FsWalker {
    fn walk(&self) -> Box<dyn Iterator<Item = SourceFile> + '_> {
        let iter = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(move |entry| {
                let path = entry.path();
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                if self.is_ignored(relative) || !self.is_allowed_extension(relative) {
                    return None;
                }
                match fs::read_to_string(path) {
                    Ok(content) => Some(SourceFile {
                        path: relative.to_string_lossy().into_owned(),
                        content,
                    }),
                    Err(e) => {
                        // Unreadable files are skipped, not fatal.
                        warn!("skipping unreadable file {:?}: {}", path, e);
                        None
                    }
                }
            });
        Box::new(iter)
    }
}
