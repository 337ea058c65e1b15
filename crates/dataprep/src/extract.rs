//! Line-based function extraction for JavaScript-family sources.
//!
//! This is a text heuristic, not a parser. A trimmed line that is exactly `}`
//! closes the open function, so nested blocks end it early, and any line that
//! looks like a definition starts a new one even inside a body.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFunction {
    pub name: String,
    pub body: String,
    pub comment: String,
}

#[derive(Debug)]
struct OpenFunction {
    name: String,
    body: Vec<String>,
    comment: String,
}

impl OpenFunction {
    fn close(self) -> ExtractedFunction {
        ExtractedFunction {
            name: self.name,
            body: self.body.join("\n"),
            comment: self.comment,
        }
    }
}

#[derive(Debug)]
enum ScanState {
    Idle,
    InFunction(OpenFunction),
    /// Inside `/* ... */`; remembers the function to resume afterwards.
    InBlockComment { resume: Option<OpenFunction> },
}

impl ScanState {
    fn resume(open: Option<OpenFunction>) -> Self {
        match open {
            Some(f) => ScanState::InFunction(f),
            None => ScanState::Idle,
        }
    }

    fn take_open(self) -> Option<OpenFunction> {
        match self {
            ScanState::InFunction(f) => Some(f),
            ScanState::InBlockComment { resume } => resume,
            ScanState::Idle => None,
        }
    }
}

pub fn extract_functions(text: &str) -> Vec<ExtractedFunction> {
    let mut out = Vec::new();
    let mut state = ScanState::Idle;
    // Block comment lines waiting to be attached to the next function.
    let mut comment: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();

        state = match state {
            ScanState::InBlockComment { resume } => {
                comment.push(trimmed.to_string());
                if trimmed.ends_with("*/") {
                    ScanState::resume(resume)
                } else {
                    ScanState::InBlockComment { resume }
                }
            }

            current if trimmed.starts_with("/*") => {
                comment = vec![trimmed.to_string()];
                let open = current.take_open();
                if trimmed.len() >= 4 && trimmed.ends_with("*/") {
                    ScanState::resume(open)
                } else {
                    ScanState::InBlockComment { resume: open }
                }
            }

            current if is_function_line(line, trimmed) => {
                if let Some(prev) = current.take_open() {
                    out.push(prev.close());
                }
                let comment = std::mem::take(&mut comment).join("\n");
                // an unnamed `function (` closes the open function but starts nothing
                match function_name(line) {
                    Some(name) => ScanState::InFunction(OpenFunction {
                        name,
                        body: vec![trimmed.to_string()],
                        comment,
                    }),
                    None => ScanState::Idle,
                }
            }

            ScanState::InFunction(mut f) if !trimmed.is_empty() => {
                f.body.push(trimmed.to_string());
                if trimmed == "}" && f.body.len() > 1 {
                    out.push(f.close());
                    ScanState::Idle
                } else {
                    ScanState::InFunction(f)
                }
            }

            other => other,
        };
    }

    if let Some(f) = state.take_open() {
        out.push(f.close());
    }
    out
}

const DECLARATIONS: &[&str] = &["const ", "let ", "var "];

fn is_function_line(line: &str, trimmed: &str) -> bool {
    line.contains("function ")
        || line.contains("=>")
        || (DECLARATIONS.iter().any(|d| trimmed.starts_with(d)) && line.contains('('))
        || (trimmed.starts_with("async ") && line.contains("function"))
}

fn is_declaration(line: &str) -> bool {
    let line = line.trim_start();
    DECLARATIONS.iter().any(|d| line.starts_with(d))
}

fn function_name(line: &str) -> Option<String> {
    if let Some((_, after)) = line.split_once("function ") {
        let name = after.split('(').next().unwrap_or_default().trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    let lhs = line.split('=').next().unwrap_or_default();

    if line.contains("=>") {
        // keeps the space before `=`: "const add = () =>" names "add "
        let lhs = lhs.trim_start();
        let lhs = DECLARATIONS
            .iter()
            .find_map(|d| lhs.strip_prefix(d))
            .unwrap_or(lhs);
        return Some(lhs.to_string());
    }

    if is_declaration(line) {
        return lhs.split_whitespace().nth(1).map(str::to_string);
    }

    None
}

/// Text form embedded in dataset responses: a JSON array of
/// `{name, body, comment}` objects.
pub fn render_functions(functions: &[ExtractedFunction]) -> String {
    serde_json::to_string(functions).unwrap_or_else(|_| "[]".to_string())
}
