use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::info;

use crate::config::AppConfig;
use crate::provider::{FineTuneGateway, FineTuneJob, GatewayInfo};

/// OpenAI-compatible REST client.
pub struct OpenAiGateway {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiGateway {
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.gateway_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into an error carrying the provider's message.
async fn check(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    bail!("provider returned HTTP {status}: {}", provider_message(&text));
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl FineTuneGateway for OpenAiGateway {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, purpose: &str) -> anyhow::Result<String> {
        info!(file = file_name, size = bytes.len(), "uploading dataset");
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/jsonl")?;
        let form = Form::new().text("purpose", purpose.to_string()).part("file", part);

        let resp = self
            .client
            .post(self.url("files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("file upload request failed")?;
        let json: serde_json::Value = check(resp).await?.json().await?;

        json["id"]
            .as_str()
            .map(str::to_string)
            .context("file upload response has no id")
    }

    async fn create_job(&self, file_id: &str, base_model: &str) -> anyhow::Result<FineTuneJob> {
        info!(file_id, base_model, "creating fine-tuning job");
        let body = serde_json::json!({
            "training_file": file_id,
            "model": base_model,
        });

        let resp = self
            .client
            .post(self.url("fine_tuning/jobs"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("job creation request failed")?;
        Ok(check(resp).await?.json().await?)
    }

    async fn get_job(&self, job_id: &str) -> anyhow::Result<FineTuneJob> {
        let resp = self
            .client
            .get(self.url(&format!("fine_tuning/jobs/{job_id}")))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("job status request failed")?;
        Ok(check(resp).await?.json().await?)
    }

    async fn complete(&self, model_id: &str, prompt: &str, max_tokens: u32) -> anyhow::Result<String> {
        info!(model = model_id, max_tokens, "chat completion");
        let body = serde_json::json!({
            "model": model_id,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
        });

        let resp = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("completion request failed")?;
        let json: serde_json::Value = check(resp).await?.json().await?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .context("completion response has no choices[0].message.content")
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let resp = self
            .client
            .get(self.url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    fn info(&self) -> GatewayInfo {
        GatewayInfo {
            name: "openai".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}
