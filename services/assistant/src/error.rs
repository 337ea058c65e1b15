use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dataprep::DataprepError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No matching files found in the directory.")]
    NoFilesMatched,

    #[error("{0}")]
    BadRequest(String),

    #[error("File not found: {0}")]
    MissingDataset(String),

    #[error("Dataset validation failed")]
    InvalidDataset(Vec<String>),

    #[error("{0}")]
    Gateway(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFilesMatched | ApiError::BadRequest(_) | ApiError::MissingDataset(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidDataset(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::NoFilesMatched => "no_files_matched",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::MissingDataset(_) => "missing_dataset",
            ApiError::InvalidDataset(_) => "dataset_validation_failed",
            ApiError::Gateway(_) => "gateway_error",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// Provider failure, prefixed with what the request was doing.
    pub fn gateway(doing: &str, e: anyhow::Error) -> Self {
        error!("{doing}: {e:#}");
        ApiError::Gateway(format!("{doing}: {e:#}"))
    }
}

impl From<DataprepError> for ApiError {
    fn from(e: DataprepError) -> Self {
        match e {
            DataprepError::InvalidPattern { .. }
            | DataprepError::RootNotFound(_)
            | DataprepError::NotADirectory(_) => ApiError::BadRequest(e.to_string()),
            DataprepError::InvalidDataset(errors) => ApiError::InvalidDataset(errors),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.kind(),
            "detail": self.to_string(),
        });
        if let ApiError::InvalidDataset(errors) = &self {
            body["errors"] = json!(errors);
        }
        (self.status(), Json(body)).into_response()
    }
}
