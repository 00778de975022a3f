//! Trained match-outcome classifier artifact.
//!
//! The classifier itself is a black box fit offline; this crate loads the
//! persisted artifact, verifies that its feature layout matches the code
//! that will feed it, and keeps it versioned together with the team-stats
//! snapshot and team list it was trained against.

mod bundle;
mod forest;
mod schema;
mod training;

pub use bundle::{load_bundle, ModelBundle};
pub use forest::{DecisionTree, ForestClassifier, TreeNode};
pub use schema::{Classifier, ModelManifest, OutcomeClass, OUTCOME_CLASSES};
pub use training::build_training_set;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature layout mismatch: model was trained with layout v{found}, this build expects v{expected}")]
    LayoutMismatch { expected: u32, found: u32 },

    #[error("feature vector has {found} dimensions, expected {expected}")]
    FeatureDim { expected: usize, found: usize },

    #[error("malformed model: {0}")]
    MalformedModel(String),
}

pub type Result<T> = std::result::Result<T, PredictorError>;
