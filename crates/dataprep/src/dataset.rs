//! Chat-format fine-tuning records: building, writing and validating.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::extract::{extract_functions, render_functions};
use crate::summarize::summarize;
use crate::walker::FileRecord;
use crate::{DataprepError, Result};

/// Records generated per scanned file.
pub const RECORDS_PER_FILE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub messages: Vec<ChatMessage>,
}

impl DatasetRecord {
    fn exchange(prompt: String, answer: String) -> Self {
        Self { messages: vec![ChatMessage::user(prompt), ChatMessage::assistant(answer)] }
    }
}

/// Four records per file, in order: full analysis, "what functions",
/// "how to use", "show code". Files keep their scan order.
pub fn build_dataset(files: &[FileRecord]) -> Vec<DatasetRecord> {
    let mut out = Vec::with_capacity(files.len() * RECORDS_PER_FILE);

    for file in files {
        let path = &file.file_path;
        let analysis = summarize(&file.content);
        let functions = render_functions(&extract_functions(&file.content));

        let prompt = format!(
            "File: {path}\n\
             Please analyze the following code and describe all functions, classes, \
             and their purposes in detail:\n\n{}",
            file.content
        );
        let response = format!(
            "This file contains the following code analysis:\n\n\
             1. File path: {path}\n\
             2. Code content analysis:\n\
             {analysis}\n\
             3. Usage examples for any custom functions or classes found in the code.\n\
             4. The relationships between different components in the code."
        );

        out.push(DatasetRecord::exchange(prompt, response));
        out.push(DatasetRecord::exchange(
            format!("What are the functions defined in {path}?"),
            format!("Here are the functions defined in this file: {functions}"),
        ));
        out.push(DatasetRecord::exchange(
            format!("How do I use the functions in {path}?"),
            format!("Here's how to use the functions: {functions}"),
        ));
        out.push(DatasetRecord::exchange(
            format!("code for {path}?"),
            format!("Here is the code for {functions}"),
        ));
    }

    out
}

/// Replace `path` with one JSON object per line. The data goes to a sibling
/// temp file first and is renamed into place.
pub fn write_jsonl(path: &Path, records: &[DatasetRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DataprepError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.jsonl".to_string());
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp_{}", uuid::Uuid::new_v4()));

    let write = || -> Result<()> {
        let f = File::create(&tmp_path).map_err(|e| DataprepError::io(&tmp_path, e))?;
        let mut w = BufWriter::new(f);
        for rec in records {
            serde_json::to_writer(&mut w, rec)
                .map_err(|e| DataprepError::Serialization(e.to_string()))?;
            w.write_all(b"\n").map_err(|e| DataprepError::io(&tmp_path, e))?;
        }
        w.flush().map_err(|e| DataprepError::io(&tmp_path, e))?;
        Ok(())
    };

    if let Err(e) = write() {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        DataprepError::io(path, e)
    })?;

    info!(path = %path.display(), records = records.len(), "dataset written");
    Ok(())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetStats {
    pub examples: u64,
    pub dataset_hash: String, // BLAKE3 of the file bytes, hex
    pub avg_user_len: u32,
    pub avg_assistant_len: u32,
    pub duplicate_rate: f32, // 0.0..1.0
}

/// Check every line is a well-formed chat record. All line errors are
/// collected before failing.
pub fn validate_dataset(path: &Path) -> Result<DatasetStats> {
    let f = File::open(path).map_err(|e| DataprepError::io(path, e))?;
    let reader = BufReader::new(f);

    let mut errors: Vec<String> = vec![];
    let mut hasher = blake3::Hasher::new();

    let mut count: u64 = 0;
    let mut user_sum: u64 = 0;
    let mut user_count: u64 = 0;
    let mut assistant_sum: u64 = 0;
    let mut assistant_count: u64 = 0;

    let mut seen = HashSet::<[u8; 32]>::new();
    let mut dupes: u64 = 0;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                errors.push(format!("Line {line_no}: IO read error: {e}"));
                continue;
            }
        };

        hasher.update(line.as_bytes());
        hasher.update(b"\n");

        if line.trim().is_empty() {
            errors.push(format!("Line {line_no}: empty line"));
            continue;
        }

        let rec: DatasetRecord = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                errors.push(format!("Line {line_no}: invalid record: {e}"));
                continue;
            }
        };

        if rec.messages.is_empty() {
            errors.push(format!("Line {line_no}: no messages"));
            continue;
        }
        if let Some(pos) = rec.messages.iter().position(|m| m.content.trim().is_empty()) {
            errors.push(format!("Line {line_no}: message {pos} has empty content"));
            continue;
        }
        if !rec.messages.iter().any(|m| m.role == Role::Assistant) {
            errors.push(format!("Line {line_no}: no assistant message"));
            continue;
        }

        for m in &rec.messages {
            match m.role {
                Role::User => {
                    user_sum += m.content.len() as u64;
                    user_count += 1;
                }
                Role::Assistant => {
                    assistant_sum += m.content.len() as u64;
                    assistant_count += 1;
                }
                Role::System => {}
            }
        }

        if !seen.insert(blake3::hash(line.as_bytes()).into()) {
            dupes += 1;
        }
        count += 1;
    }

    if !errors.is_empty() {
        return Err(DataprepError::InvalidDataset(errors));
    }
    if count == 0 {
        return Err(DataprepError::InvalidDataset(vec!["No valid examples found".to_string()]));
    }

    let stats = DatasetStats {
        examples: count,
        dataset_hash: hex::encode(hasher.finalize().as_bytes()),
        avg_user_len: (user_sum / user_count.max(1)) as u32,
        avg_assistant_len: (assistant_sum / assistant_count.max(1)) as u32,
        duplicate_rate: (dupes as f32) / (count as f32),
    };
    debug!(examples = stats.examples, hash = %stats.dataset_hash, "dataset validated");
    Ok(stats)
}
