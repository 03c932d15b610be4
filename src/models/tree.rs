use anyhow::{bail, Result};
use ndarray::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

use crate::config::{ClassifierConfig, ModelKind};
use crate::models::{hard_proba, observed_classes, to_dense, ClassifierModel};

/// Single decision tree, used as a benchmark family.
pub struct TreeClassifier {
    model: Option<DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>>,
    classes: Vec<i32>,
    config: ClassifierConfig,
}

impl TreeClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        TreeClassifier {
            model: None,
            classes: Vec::new(),
            config,
        }
    }
}

impl ClassifierModel for TreeClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ModelKind::DecisionTree { max_depth } = self.config.kind else {
            panic!(
                "Expected ModelKind::DecisionTree params, got {:?}",
                self.config.kind
            );
        };

        let mut params = DecisionTreeClassifierParameters::default();
        if let Some(depth) = max_depth {
            params = params.with_max_depth(depth);
        }
        let fitted = DecisionTreeClassifier::fit(&to_dense(x), &y.to_vec(), params)?;

        self.classes = observed_classes(y);
        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let Some(model) = &self.model else {
            bail!("DecisionTree predict called before fit");
        };
        Ok(model.predict(&to_dense(x))?)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let predictions = self.predict(x)?;
        Ok(hard_proba(&predictions, &self.classes))
    }

    fn name(&self) -> &str {
        "Decision Tree"
    }
}
