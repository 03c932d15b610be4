//! Classification metrics shared by the evaluator and the benchmark loop.
use anyhow::{bail, Result};
use ndarray::Array2;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Confusion counts over the label domain observed in `y_true` and `y_pred`.
///
/// `matrix[(i, j)]` counts samples of true class `classes[i]` predicted as
/// `classes[j]`.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    pub classes: Vec<i32>,
    pub matrix: Array2<usize>,
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[i32], y_pred: &[i32]) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            bail!(
                "True and predicted labels must have equal length ({} vs {})",
                y_true.len(),
                y_pred.len()
            );
        }
        if y_true.is_empty() {
            bail!("Cannot build a confusion matrix from zero samples");
        }

        let mut class_index: BTreeMap<i32, usize> = BTreeMap::new();
        for &label in y_true.iter().chain(y_pred.iter()) {
            let next = class_index.len();
            class_index.entry(label).or_insert(next);
        }
        // BTreeMap iteration is sorted; rebuild the index so rows follow
        // ascending label order.
        let classes: Vec<i32> = class_index.keys().copied().collect();
        let class_index: BTreeMap<i32, usize> = classes
            .iter()
            .enumerate()
            .map(|(idx, &label)| (label, idx))
            .collect();

        let n = classes.len();
        let mut matrix = Array2::zeros((n, n));
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(class_index[&t], class_index[&p])] += 1;
        }

        Ok(ConfusionMatrix { classes, matrix })
    }

    /// Recall per class, aligned with `self.classes`. Classes absent from
    /// `y_true` (possible when a prediction invents them) score 0.
    pub fn recall_per_class(&self) -> Vec<f64> {
        (0..self.classes.len())
            .map(|i| {
                let support: usize = self.matrix.row(i).sum();
                if support == 0 {
                    0.0
                } else {
                    self.matrix[(i, i)] as f64 / support as f64
                }
            })
            .collect()
    }

    /// Macro-averaged recall: the unweighted mean of per-class recalls.
    pub fn macro_recall(&self) -> f64 {
        let recalls = self.recall_per_class();
        recalls.iter().sum::<f64>() / recalls.len() as f64
    }

    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.classes.len()).map(|i| self.matrix[(i, i)]).sum();
        let total: usize = self.matrix.iter().sum();
        correct as f64 / total as f64
    }
}

/// Macro-averaged recall of a prediction against ground truth.
pub fn macro_recall(y_true: &[i32], y_pred: &[i32]) -> Result<f64> {
    Ok(ConfusionMatrix::from_predictions(y_true, y_pred)?.macro_recall())
}

/// Mean and population standard deviation of a score sequence.
///
/// The population form (n divisor) keeps benchmark whiskers comparable to
/// the source system's aggregation. A sequence shorter than 2 has zero
/// deviation.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    (values.mean(), values.population_std_dev())
}
