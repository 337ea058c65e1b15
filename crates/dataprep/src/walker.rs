//! Directory traversal producing in-memory file records.
//!
//! Excluded directories are pruned before descent, so nothing beneath them is
//! ever read. Entries are visited in file-name order, which keeps repeated
//! scans of an unchanged tree byte-for-byte stable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::pattern::PatternSet;
use crate::{DataprepError, Result};

pub const DEFAULT_INCLUDE: &[&str] = &[
    "*.ts", "*.tsx", "*.jsx", "*.js", "*.html", "*.css", "*.scss", "*.sass", "*.less",
    "*.py", "*.java", "*.cpp", "*.c", "*.cs", "*.go", "*.rs", "*.rb", "*.php",
    "*.json", "*.yaml", "*.yml", "*.toml", "*.ini", "*.conf",
    "*.md", "*.rst", "*.txt",
    "*.sh", "*.bash", "*.zsh", "*.fish",
    "*.sql", "*.graphql", "*.proto",
];

pub const DEFAULT_EXCLUDE: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/build/**",
    "**/dist/**",
    "**/.next/**",
    "**/venv/**",
    "**/__pycache__/**",
    "**/coverage/**",
    "*.min.js",
    "*.min.css",
    "*.map",
    "*.jpg", "*.jpeg", "*.png", "*.gif", "*.ico", "*.pdf",
    "package-lock.json",
    "yarn.lock",
    "poetry.lock",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ScanRequest {
    /// Scan `root` with the default source-code pattern lists.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_name: String,
    pub file_path: String, // relative to the scan root, '/'-separated
    pub content: String,
}

/// A file (or directory) that matched but could not be read.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    pub files: Vec<FileRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// No file satisfied the patterns (or every match was unreadable).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn scan(req: &ScanRequest) -> Result<ScanReport> {
    let root = req.root.as_path();
    if !root.exists() {
        return Err(DataprepError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DataprepError::NotADirectory(root.to_path_buf()));
    }

    let include = PatternSet::new(&req.include)?;
    let exclude = PatternSet::new(&req.exclude)?;

    let mut report = ScanReport::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e, root, &exclude));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| relative_path(root, p))
                    .unwrap_or_default();
                warn!(path = %path, error = %e, "skipping unreadable entry");
                report.skipped.push(SkippedFile { path, reason: e.to_string() });
                continue;
            }
        };

        if !is_readable_file(&entry) {
            continue;
        }

        let rel = relative_path(root, entry.path());
        let name = entry.file_name().to_string_lossy().into_owned();

        if !include.is_match_any([name.as_str(), rel.as_str()]) {
            continue;
        }
        if exclude.is_match_any([name.as_str(), rel.as_str()]) {
            debug!(path = %rel, "excluded");
            continue;
        }

        match std::fs::read_to_string(entry.path()) {
            Ok(content) => report.files.push(FileRecord {
                file_name: name,
                file_path: rel,
                content,
            }),
            Err(e) => {
                warn!(path = %rel, error = %e, "error reading file, skipping");
                report.skipped.push(SkippedFile { path: rel, reason: e.to_string() });
            }
        }
    }

    debug!(files = report.files.len(), skipped = report.skipped.len(), "scan complete");
    Ok(report)
}

/// Directory pruning: the bare name, the relative path, and the relative path
/// with a trailing separator are all tested, so both `node_modules` and
/// `**/node_modules/**` prune the directory.
fn is_pruned(entry: &DirEntry, root: &Path, exclude: &PatternSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let rel = relative_path(root, entry.path());
    let rel_dir = format!("{rel}/");
    exclude.is_match_any([&*name, rel.as_str(), rel_dir.as_str()])
}

/// Regular files, plus symlinks whose target is a file. Symlinked
/// directories are never descended into.
fn is_readable_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
