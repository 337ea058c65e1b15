use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub name: String,
    pub base_url: String,
}

/// Fine-tuning job as reported by the provider. Only read, never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineTuneJob {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub finished_at: Option<i64>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
}

/// Remote provider that stores datasets, runs fine-tuning jobs and serves
/// completions.
#[async_trait]
pub trait FineTuneGateway: Send + Sync {
    /// Returns the provider's file id.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, purpose: &str) -> anyhow::Result<String>;
    async fn create_job(&self, file_id: &str, base_model: &str) -> anyhow::Result<FineTuneJob>;
    async fn get_job(&self, job_id: &str) -> anyhow::Result<FineTuneJob>;
    async fn complete(&self, model_id: &str, prompt: &str, max_tokens: u32) -> anyhow::Result<String>;
    async fn ping(&self) -> anyhow::Result<()>;
    fn info(&self) -> GatewayInfo;
}
