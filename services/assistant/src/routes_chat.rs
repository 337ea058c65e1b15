use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::error::ApiError;
use crate::state::SharedState;
use crate::types::{ModelQueryRequest, ModelQueryResponse};

pub async fn model_response(
    State(state): State<SharedState>,
    body: Result<Json<ModelQueryRequest>, JsonRejection>,
) -> Result<Json<ModelQueryResponse>, ApiError> {
    let Json(req) = body?;

    let out = state
        .gateway
        .complete(&req.model_id, &req.prompt, state.config.max_tokens)
        .await
        .map_err(|e| ApiError::gateway("Error querying the model", e))?;

    Ok(Json(ModelQueryResponse {
        model_id: req.model_id,
        prompt: req.prompt,
        response: out,
    }))
}
