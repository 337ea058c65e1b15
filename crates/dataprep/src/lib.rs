//! Codebase-to-dataset preparation
//!
//! Walks a source tree, derives heuristic summaries and function listings from
//! each file, and turns them into chat-format fine-tuning records.

pub mod pattern;
pub mod walker;
pub mod summarize;
pub mod usage;
pub mod extract;
pub mod dataset;

pub use pattern::{matches, PatternSet};
pub use walker::{scan, FileRecord, ScanReport, ScanRequest, SkippedFile, DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
pub use summarize::summarize;
pub use usage::{example_args, usage_examples};
pub use extract::{extract_functions, render_functions, ExtractedFunction};
pub use dataset::{build_dataset, validate_dataset, write_jsonl, ChatMessage, DatasetRecord, DatasetStats, Role};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataprepError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Dataset validation failed with {} error(s)", .0.len())]
    InvalidDataset(Vec<String>),
}

impl DataprepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataprepError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, DataprepError>;
