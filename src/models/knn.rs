use anyhow::{bail, Result};
use ndarray::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::distance::euclidian::Euclidian;
use smartcore::neighbors::knn_classifier::{KNNClassifier, KNNClassifierParameters};

use crate::config::{ClassifierConfig, ModelKind};
use crate::models::{hard_proba, observed_classes, to_dense, ClassifierModel};

/// K-nearest-neighbors classifier, used as a benchmark family.
pub struct KnnClassifier {
    model: Option<KNNClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>, Euclidian<f64>>>,
    classes: Vec<i32>,
    config: ClassifierConfig,
}

impl KnnClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        KnnClassifier {
            model: None,
            classes: Vec::new(),
            config,
        }
    }
}

impl ClassifierModel for KnnClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ModelKind::KNearestNeighbors { k } = self.config.kind else {
            panic!(
                "Expected ModelKind::KNearestNeighbors params, got {:?}",
                self.config.kind
            );
        };
        if y.len() < k {
            bail!("KNN needs at least k={} training samples, got {}", k, y.len());
        }

        let params = KNNClassifierParameters::default().with_k(k);
        let fitted = KNNClassifier::fit(&to_dense(x), &y.to_vec(), params)?;

        self.classes = observed_classes(y);
        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let Some(model) = &self.model else {
            bail!("KNN predict called before fit");
        };
        Ok(model.predict(&to_dense(x))?)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let predictions = self.predict(x)?;
        Ok(hard_proba(&predictions, &self.classes))
    }

    fn name(&self) -> &str {
        "K-Nearest Neighbors"
    }
}
