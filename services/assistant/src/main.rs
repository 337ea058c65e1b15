mod config;
mod error;
mod state;
mod types;
mod provider;
mod provider_openai;
mod routes_preprocess;
mod routes_training;
mod routes_chat;
#[cfg(test)]
mod test_support;

use axum::{routing::{get, post}, Json, Router};
use tower_http::cors::CorsLayer;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::provider::FineTuneGateway;
use crate::state::{AppState, SharedState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let gateway = crate::provider_openai::OpenAiGateway::from_config(&cfg)?;
    startup_checks(&gateway).await;

    let addr = cfg.bind_addr.clone();
    let app_state = Arc::new(AppState::new(cfg, Arc::new(gateway)));
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("assistant listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/preprocess", post(crate::routes_preprocess::preprocess))
        .route("/model/fine-tune", post(crate::routes_training::fine_tune))
        .route("/model/job/:job_id", get(crate::routes_training::get_job))
        .route("/model/response", post(crate::routes_chat::model_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Provider reachability is reported, not enforced: the scan endpoint works
/// without it.
async fn startup_checks(gateway: &dyn FineTuneGateway) {
    let info = gateway.info();
    match gateway.ping().await {
        Ok(()) => info!(provider = %info.name, base_url = %info.base_url, "provider: ok"),
        Err(e) => warn!(provider = %info.name, base_url = %info.base_url, "provider unreachable: {e:#}"),
    }
}
