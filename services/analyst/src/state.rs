use std::sync::Arc;

use predictor::ModelBundle;
use worldcup::{ResultRecord, TeamAliases};

use crate::rag::RetrievalAnswerer;

pub type SharedState = Arc<AppState>;

/// Prediction capability at startup. Distinct from "ready but team
/// unknown", which is a soft fallback inside prediction itself.
pub enum PredictorState {
    Ready(ModelBundle),
    Unavailable { reason: String },
}

/// Everything a request handler needs, built once in main and shared
/// read-only. Nothing here mutates after startup, so concurrent requests
/// need no locking.
pub struct AppState {
    pub results: Vec<ResultRecord>,
    pub aliases: TeamAliases,
    pub predictor: PredictorState,
    pub answerer: RetrievalAnswerer,
}
