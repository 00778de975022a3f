use serde::{Deserialize, Serialize};

/// The three outcome classes, in the fixed index order the classifier was
/// trained with: 0 home win, 1 draw, 2 away win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    HomeWin,
    Draw,
    AwayWin,
}

pub const OUTCOME_CLASSES: [OutcomeClass; 3] =
    [OutcomeClass::HomeWin, OutcomeClass::Draw, OutcomeClass::AwayWin];

impl OutcomeClass {
    pub fn index(self) -> usize {
        match self {
            OutcomeClass::HomeWin => 0,
            OutcomeClass::Draw => 1,
            OutcomeClass::AwayWin => 2,
        }
    }
}

/// Metadata persisted alongside the serialized classifier.
///
/// `feature_layout_version` is the guard against silently feeding a model a
/// vector layout it was not trained on; loading fails when it differs from
/// `worldcup::FEATURE_LAYOUT_VERSION`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelManifest {
    pub feature_layout_version: u32,
    pub classes: Vec<OutcomeClass>,
    pub trained_at: Option<String>,
    pub n_samples: Option<u64>,
}

/// Generic probability classifier over the three outcome classes.
pub trait Classifier: Send + Sync {
    /// Class probabilities for one feature vector, indexed per
    /// `OUTCOME_CLASSES`.
    fn predict_proba(&self, features: &[f64]) -> crate::Result<[f64; 3]>;

    fn classes(&self) -> &'static [OutcomeClass] {
        &OUTCOME_CLASSES
    }
}
