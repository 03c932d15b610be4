pub mod classifier_trait;
pub mod factory;
pub mod forest;
pub mod knn;
pub mod logistic;
pub mod tree;
pub mod voting;

pub use classifier_trait::ClassifierModel;

use ndarray::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::BTreeSet;

/// Convert a feature table into the backend's matrix type.
pub(crate) fn to_dense(x: &Array2<f64>) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = x.outer_iter().map(|row| row.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}

/// The label domain observed in `y`, ascending.
pub(crate) fn observed_classes(y: &[i32]) -> Vec<i32> {
    y.iter().copied().collect::<BTreeSet<i32>>().into_iter().collect()
}

/// The class whose probability is reported per sample: the second class of
/// the ascending domain (the positive class for 0/1 labels), or the only
/// class when the domain is degenerate.
pub(crate) fn primary_class(classes: &[i32]) -> Option<i32> {
    classes.get(1).or_else(|| classes.first()).copied()
}

/// Degenerate probability for backends that only expose hard labels: 1.0
/// when the predicted label is the primary class, else 0.0.
pub(crate) fn hard_proba(predictions: &[i32], classes: &[i32]) -> Vec<f64> {
    let primary = primary_class(classes);
    predictions
        .iter()
        .map(|&p| if Some(p) == primary { 1.0 } else { 0.0 })
        .collect()
}
