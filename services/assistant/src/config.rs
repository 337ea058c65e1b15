use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub bind_addr: String,
    pub dataset_path: PathBuf,
    pub base_model: String,
    pub max_tokens: u32,
    /// None = wait for the provider indefinitely.
    pub gateway_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = get("OPENAI_API_KEY")?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let bind_addr = std::env::var("ASSISTANT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let dataset_path = std::env::var("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/preprocess.jsonl"));
        let base_model = std::env::var("FINE_TUNE_BASE_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let max_tokens = match std::env::var("COMPLETION_MAX_TOKENS") {
            Ok(v) => v
                .parse::<u32>()
                .with_context(|| format!("COMPLETION_MAX_TOKENS must be a positive integer, got {v:?}"))?,
            Err(_) => 100,
        };

        let gateway_timeout = match std::env::var("GATEWAY_TIMEOUT_SECS") {
            Ok(v) => {
                let secs = v
                    .parse::<u64>()
                    .with_context(|| format!("GATEWAY_TIMEOUT_SECS must be a number of seconds, got {v:?}"))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        // Tiny sanity checks (fail fast, fail loud)
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("OPENAI_BASE_URL must start with http:// or https://");
        }
        if max_tokens == 0 {
            bail!("COMPLETION_MAX_TOKENS must be greater than zero");
        }
        if gateway_timeout == Some(Duration::ZERO) {
            bail!("GATEWAY_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            bind_addr,
            dataset_path,
            base_model,
            max_tokens,
            gateway_timeout,
        })
    }
}

fn get(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing required env var: {key}"))
}
