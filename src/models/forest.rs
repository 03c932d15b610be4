use anyhow::{bail, Result};
use ndarray::Array2;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::config::{ClassWeight, ClassifierConfig, ModelKind};
use crate::data_handling::balanced_sample_indices;
use crate::models::{hard_proba, observed_classes, to_dense, ClassifierModel};

/// Random forest used for multiclass diagnostic classification.
#[derive(Debug)]
pub struct ForestClassifier {
    model: Option<RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>>,
    classes: Vec<i32>,
    config: ClassifierConfig,
}

impl ForestClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        ForestClassifier {
            model: None,
            classes: Vec::new(),
            config,
        }
    }
}

impl ClassifierModel for ForestClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ModelKind::RandomForest { n_trees, class_weight } = self.config.kind else {
            panic!(
                "Expected ModelKind::RandomForest params, got {:?}",
                self.config.kind
            );
        };

        let (x_fit, y_fit) = match class_weight {
            ClassWeight::Balanced => {
                let indices = balanced_sample_indices(y, self.config.seed);
                let x_bal = crate::data_handling::select_rows(x, &indices);
                let y_bal: Vec<i32> = indices.iter().map(|&i| y[i]).collect();
                (x_bal, y_bal)
            }
            ClassWeight::Uniform => (x.to_owned(), y.to_vec()),
        };

        let params = RandomForestClassifierParameters::default()
            .with_n_trees(n_trees)
            .with_seed(self.config.seed);
        let fitted = RandomForestClassifier::fit(&to_dense(&x_fit), &y_fit, params)?;

        self.classes = observed_classes(y);
        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let Some(model) = &self.model else {
            bail!("RandomForest predict called before fit");
        };
        Ok(model.predict(&to_dense(x))?)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        // The backend exposes no per-tree votes, so this reports the
        // degenerate hard-label probability of the primary class.
        let predictions = self.predict(x)?;
        Ok(hard_proba(&predictions, &self.classes))
    }

    fn name(&self) -> &str {
        "Random Forest"
    }
}
