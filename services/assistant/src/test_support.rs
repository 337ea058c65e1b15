use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::provider::{FineTuneGateway, FineTuneJob, GatewayInfo};
use crate::state::{AppState, SharedState};

/// In-memory gateway that records every successful call.
#[derive(Clone, Default)]
pub struct FakeGateway {
    calls: Arc<Mutex<Vec<String>>>,
    job: Option<FineTuneJob>,
    fail: Option<String>,
}

impl FakeGateway {
    pub fn failing(message: &str) -> Self {
        Self { fail: Some(message.to_string()), ..Default::default() }
    }

    pub fn with_job(job: FineTuneJob) -> Self {
        Self { job: Some(job), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> anyhow::Result<()> {
        if let Some(msg) = &self.fail {
            anyhow::bail!("{msg}");
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl FineTuneGateway for FakeGateway {
    async fn upload(&self, file_name: &str, _bytes: Vec<u8>, purpose: &str) -> anyhow::Result<String> {
        self.record(format!("upload {file_name} {purpose}"))?;
        Ok("file-fake".to_string())
    }

    async fn create_job(&self, file_id: &str, base_model: &str) -> anyhow::Result<FineTuneJob> {
        self.record(format!("create_job {file_id} {base_model}"))?;
        Ok(FineTuneJob {
            id: "ftjob-fake".to_string(),
            status: "validating_files".to_string(),
            created_at: 0,
            finished_at: None,
            error: None,
            fine_tuned_model: None,
        })
    }

    async fn get_job(&self, job_id: &str) -> anyhow::Result<FineTuneJob> {
        self.record(format!("get_job {job_id}"))?;
        self.job.clone().ok_or_else(|| anyhow::anyhow!("No such fine-tuning job: {job_id}"))
    }

    async fn complete(&self, model_id: &str, prompt: &str, max_tokens: u32) -> anyhow::Result<String> {
        self.record(format!("complete {model_id} {max_tokens}"))?;
        Ok(format!("echo: {prompt}"))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.record("ping".to_string())
    }

    fn info(&self) -> GatewayInfo {
        GatewayInfo { name: "fake".to_string(), base_url: "http://fake.invalid".to_string() }
    }
}

/// State whose dataset file lives in a fresh temp dir. Keep the dir alive for
/// the duration of the test.
pub fn fake_state(gateway: FakeGateway) -> (SharedState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig {
        api_key: "sk-test".to_string(),
        base_url: "http://fake.invalid".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        dataset_path: dir.path().join("data").join("preprocess.jsonl"),
        base_model: "gpt-3.5-turbo".to_string(),
        max_tokens: 100,
        gateway_timeout: None,
    };
    (Arc::new(AppState::new(config, Arc::new(gateway))), dir)
}
