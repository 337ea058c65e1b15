use serde::{Deserialize, Serialize};

fn default_include() -> Vec<String> {
    dataprep::DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect()
}

fn default_exclude() -> Vec<String> {
    dataprep::DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect()
}

#[derive(Clone, Debug, Deserialize)]
pub struct PreprocessRequest {
    pub directory_path: String,
    #[serde(default = "default_include")]
    pub file_patterns: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreprocessResponse {
    pub message: String,
    pub files: usize,
    pub records: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct FineTuneResponse {
    pub job_id: String,
    pub message: String,
    pub dataset_hash: String,
    pub examples: u64,
}

#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: String,
    pub created_at: i64,
    pub finished_at: Option<i64>,
    pub error: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub message: &'static str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModelQueryRequest {
    pub model_id: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ModelQueryResponse {
    pub model_id: String,
    pub prompt: String,
    pub response: String,
}
