use axum::{extract::{Path, State}, Json};
use dataprep::validate_dataset;
use tracing::info;

use crate::error::ApiError;
use crate::state::SharedState;
use crate::types::{FineTuneResponse, JobStatusResponse};

pub const FILE_PURPOSE: &str = "fine-tune";

pub fn status_message(status: &str) -> &'static str {
    match status {
        "succeeded" => "Fine-tuning job completed successfully.",
        "failed" => "Fine-tuning job failed.",
        "cancelled" => "Fine-tuning job was cancelled.",
        "pending" => "Fine-tuning job is pending.",
        "running" => "Fine-tuning job is currently running.",
        "validating_files" => "Fine-tuning job is validating files.",
        _ => "Unknown status for fine-tuning job.",
    }
}

pub async fn fine_tune(
    State(state): State<SharedState>,
) -> Result<Json<FineTuneResponse>, ApiError> {
    let path = state.config.dataset_path.clone();
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(ApiError::MissingDataset(path.display().to_string()));
    }

    // blocking validate + hash
    let validate_path = path.clone();
    let stats = tokio::task::spawn_blocking(move || validate_dataset(&validate_path)).await??;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Error reading {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.jsonl".to_string());

    let gateway = &state.gateway;
    let file_id = gateway
        .upload(&file_name, bytes, FILE_PURPOSE)
        .await
        .map_err(|e| ApiError::gateway("Error during fine-tuning", e))?;
    let job = gateway
        .create_job(&file_id, &state.config.base_model)
        .await
        .map_err(|e| ApiError::gateway("Error during fine-tuning", e))?;

    info!(job_id = %job.id, file_id = %file_id, examples = stats.examples, "fine-tuning job created");

    Ok(Json(FineTuneResponse {
        message: format!("Fine-tuning job created successfully with ID: {}", job.id),
        job_id: job.id,
        dataset_hash: stats.dataset_hash,
        examples: stats.examples,
    }))
}

pub async fn get_job(
    State(state): State<SharedState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let job = state
        .gateway
        .get_job(&job_id)
        .await
        .map_err(|e| ApiError::gateway("Error checking job status", e))?;

    let model = if job.status == "succeeded" { job.fine_tuned_model } else { None };

    Ok(Json(JobStatusResponse {
        job_id,
        message: status_message(&job.status),
        status: job.status,
        created_at: job.created_at,
        finished_at: job.finished_at,
        error: job.error,
        model,
    }))
}
