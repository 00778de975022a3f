use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::predict::{predict_match, MatchPrediction};
use crate::state::{PredictorState, SharedState};

#[derive(Deserialize)]
pub struct PredictRequest {
    pub home_team: String,
    pub away_team: String,
}

pub async fn predict(
    State(state): State<SharedState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<MatchPrediction>, ApiError> {
    let bundle = match &state.predictor {
        PredictorState::Ready(bundle) => bundle,
        PredictorState::Unavailable { reason } => {
            return Err(ApiError::Unavailable(format!(
                "prediction model not loaded: {reason}"
            )))
        }
    };

    let prediction = predict_match(
        &req.home_team,
        &req.away_team,
        bundle,
        &state.results,
        &state.aliases,
    )?;
    Ok(Json(prediction))
}
