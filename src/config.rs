use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for classifier models in the crate.
///
/// The seed drives every randomized step performed by a model wrapper
/// (balanced resampling, tree bagging), so two models built from the same
/// config produce the same fit.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClassifierConfig {
    pub seed: u64,

    #[serde(flatten)]
    pub kind: ModelKind,
}

/// How to compensate for label imbalance when fitting.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    /// Use the training rows as-is.
    Uniform,
    /// Oversample minority classes to the majority count before fitting.
    Balanced,
}

/// Supported model families and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelKind {
    LogisticRegression {
        /// Regularization strength passed to the backend.
        alpha: f64,
        class_weight: ClassWeight,
    },
    DecisionTree {
        max_depth: Option<u16>,
    },
    KNearestNeighbors {
        k: usize,
    },
    RandomForest {
        n_trees: u16,
        class_weight: ClassWeight,
    },
    /// Hard-voting ensemble over the listed member families.
    Voting {
        members: Vec<ModelKind>,
    },
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::LogisticRegression {
            alpha: 1.0,
            class_weight: ClassWeight::Balanced,
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic_regression" => Ok(ModelKind::LogisticRegression {
                alpha: 1.0,
                class_weight: ClassWeight::Balanced,
            }),
            "decision_tree" => Ok(ModelKind::DecisionTree { max_depth: None }),
            "k_nearest_neighbors" => Ok(ModelKind::KNearestNeighbors { k: 5 }),
            "random_forest" => Ok(ModelKind::RandomForest {
                n_trees: 100,
                class_weight: ClassWeight::Uniform,
            }),
            "voting" => Ok(ModelKind::Voting {
                members: vec![
                    ModelKind::from_str("logistic_regression")?,
                    ModelKind::from_str("random_forest")?,
                    ModelKind::from_str("k_nearest_neighbors")?,
                ],
            }),
            _ => Err(format!("Unknown model kind: {}", s)),
        }
    }
}

impl ClassifierConfig {
    pub fn new(seed: u64, kind: ModelKind) -> Self {
        Self { seed, kind }
    }

    /// Balanced random forest used for multiclass diagnostic classification.
    pub fn multiclass_default(seed: u64) -> Self {
        Self {
            seed,
            kind: ModelKind::RandomForest {
                n_trees: 100,
                class_weight: ClassWeight::Balanced,
            },
        }
    }

    /// Balanced regularized logistic regression used for the binary
    /// melanoma / non-melanoma task.
    pub fn binary_default(seed: u64) -> Self {
        Self {
            seed,
            kind: ModelKind::LogisticRegression {
                alpha: 1.0,
                class_weight: ClassWeight::Balanced,
            },
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::binary_default(42)
    }
}
