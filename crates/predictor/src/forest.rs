//! Serialized decision-forest classifier.
//!
//! The artifact is a JSON forest exported by the offline trainer: each tree
//! is a flat node array with the root at index 0, split nodes routing on
//! `feature <= threshold`, leaves carrying a class-probability triple.
//! Inference averages leaf distributions across trees.

use serde::{Deserialize, Serialize};

use crate::schema::{Classifier, ModelManifest};
use crate::{PredictorError, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        probs: [f64; 3],
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn evaluate(&self, features: &[f64]) -> Result<[f64; 3]> {
        let mut idx = 0usize;
        // A well-formed tree terminates well before nodes.len() hops;
        // the bound turns a corrupt cyclic artifact into an error.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { probs }) => return Ok(*probs),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().ok_or(
                        PredictorError::FeatureDim {
                            expected: *feature + 1,
                            found: features.len(),
                        },
                    )?;
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(PredictorError::MalformedModel(format!(
                        "node index {idx} out of bounds"
                    )))
                }
            }
        }
        Err(PredictorError::MalformedModel(
            "cycle detected in tree".to_string(),
        ))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForestClassifier {
    pub manifest: ModelManifest,
    pub trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    /// Parse from JSON bytes and verify the feature layout version.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let forest: ForestClassifier = serde_json::from_slice(bytes)?;
        let found = forest.manifest.feature_layout_version;
        if found != worldcup::FEATURE_LAYOUT_VERSION {
            return Err(PredictorError::LayoutMismatch {
                expected: worldcup::FEATURE_LAYOUT_VERSION,
                found,
            });
        }
        if forest.trees.is_empty() {
            return Err(PredictorError::MalformedModel("empty forest".to_string()));
        }
        Ok(forest)
    }
}

impl Classifier for ForestClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 3]> {
        if features.len() != worldcup::FEATURE_DIM {
            return Err(PredictorError::FeatureDim {
                expected: worldcup::FEATURE_DIM,
                found: features.len(),
            });
        }

        // `from_json` rejects empty forests, but the fields are public;
        // a treeless value must not average into NaN.
        if self.trees.is_empty() {
            return Err(PredictorError::MalformedModel("empty forest".to_string()));
        }

        let mut acc = [0.0f64; 3];
        for tree in &self.trees {
            let probs = tree.evaluate(features)?;
            for (a, p) in acc.iter_mut().zip(probs) {
                *a += p;
            }
        }
        let n = self.trees.len() as f64;
        for a in &mut acc {
            *a /= n;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OUTCOME_CLASSES;

    fn manifest() -> ModelManifest {
        ModelManifest {
            feature_layout_version: worldcup::FEATURE_LAYOUT_VERSION,
            classes: OUTCOME_CLASSES.to_vec(),
            trained_at: None,
            n_samples: None,
        }
    }

    fn leaf(probs: [f64; 3]) -> DecisionTree {
        DecisionTree {
            nodes: vec![TreeNode::Leaf { probs }],
        }
    }

    #[test]
    fn averages_across_trees() {
        let forest = ForestClassifier {
            manifest: manifest(),
            trees: vec![leaf([1.0, 0.0, 0.0]), leaf([0.0, 1.0, 0.0])],
        };
        let probs = forest.predict_proba(&[0.0; 15]).unwrap();
        assert_eq!(probs, [0.5, 0.5, 0.0]);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let forest = ForestClassifier {
            manifest: manifest(),
            trees: vec![
                leaf([0.7, 0.2, 0.1]),
                leaf([0.4, 0.3, 0.3]),
                leaf([0.2, 0.2, 0.6]),
            ],
        };
        let probs = forest.predict_proba(&[0.0; 15]).unwrap();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn split_routes_on_threshold() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    probs: [1.0, 0.0, 0.0],
                },
                TreeNode::Leaf {
                    probs: [0.0, 0.0, 1.0],
                },
            ],
        };
        let forest = ForestClassifier {
            manifest: manifest(),
            trees: vec![tree],
        };

        let mut low = [0.0; 15];
        low[0] = 0.5; // boundary goes left
        assert_eq!(forest.predict_proba(&low).unwrap(), [1.0, 0.0, 0.0]);

        let mut high = [0.0; 15];
        high[0] = 0.9;
        assert_eq!(forest.predict_proba(&high).unwrap(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn wrong_dimension_is_an_error() {
        let forest = ForestClassifier {
            manifest: manifest(),
            trees: vec![leaf([1.0, 0.0, 0.0])],
        };
        assert!(matches!(
            forest.predict_proba(&[0.0; 4]),
            Err(PredictorError::FeatureDim { expected: 15, found: 4 })
        ));
    }

    #[test]
    fn treeless_forest_is_an_error_not_nan() {
        let forest = ForestClassifier {
            manifest: manifest(),
            trees: Vec::new(),
        };
        assert!(matches!(
            forest.predict_proba(&[0.0; 15]),
            Err(PredictorError::MalformedModel(_))
        ));
    }

    #[test]
    fn layout_mismatch_is_rejected_at_parse() {
        let mut m = manifest();
        m.feature_layout_version = 999;
        let forest = ForestClassifier {
            manifest: m,
            trees: vec![leaf([1.0, 0.0, 0.0])],
        };
        let bytes = serde_json::to_vec(&forest).unwrap();
        assert!(matches!(
            ForestClassifier::from_json(&bytes),
            Err(PredictorError::LayoutMismatch { found: 999, .. })
        ));
    }
}
