use axum::{extract::State, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::state::{PredictorState, SharedState};

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "message": "FIFA AI Analyst is running"}))
}

/// Sorted known-team list for the client dropdown, taken from the loaded
/// model bundle so it always matches what prediction can actually serve.
pub async fn teams(State(state): State<SharedState>) -> Result<Json<Vec<String>>, ApiError> {
    match &state.predictor {
        PredictorState::Ready(bundle) => Ok(Json(bundle.teams.clone())),
        PredictorState::Unavailable { reason } => Err(ApiError::Unavailable(format!(
            "team list not loaded: {reason}"
        ))),
    }
}
