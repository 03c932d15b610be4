use anyhow::Result;
use ndarray::Array2;

/// Capability interface shared by all classifier wrappers.
///
/// The underlying learning algorithms are opaque backend capabilities; a
/// wrapper only adapts fitting, label prediction and probability prediction
/// to the crate's tabular types. Implementations live next to their model
/// code in this module tree.
pub trait ClassifierModel {
    /// Fit the model on row-aligned features and labels.
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()>;

    /// Predict a discrete label for every row. Fails before `fit`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>>;

    /// Predicted probability of the primary class, in [0, 1], for every row.
    ///
    /// Backends without calibrated probabilities report the degenerate
    /// hard-label probability instead.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Human readable family name.
    fn name(&self) -> &str {
        "classifier"
    }
}
