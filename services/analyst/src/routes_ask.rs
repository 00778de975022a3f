use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::SharedState;

fn default_n_results() -> i64 {
    5
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default = "default_n_results")]
    pub n_results: i64,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<serde_json::Value>,
}

pub async fn ask(
    State(state): State<SharedState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let grounded = state.answerer.answer(&req.question, req.n_results).await?;
    Ok(Json(AskResponse {
        answer: grounded.answer,
        sources: grounded.sources,
    }))
}
