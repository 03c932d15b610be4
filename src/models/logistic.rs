use anyhow::{bail, Result};
use ndarray::Array2;
use smartcore::linalg::basic::arrays::Array as _;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};

use crate::config::{ClassWeight, ClassifierConfig, ModelKind};
use crate::data_handling::balanced_sample_indices;
use crate::models::{observed_classes, to_dense, ClassifierModel};

/// Regularized logistic regression for the binary melanoma task.
#[derive(Debug)]
pub struct LogisticClassifier {
    model: Option<LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>>,
    classes: Vec<i32>,
    config: ClassifierConfig,
}

impl LogisticClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        LogisticClassifier {
            model: None,
            classes: Vec::new(),
            config,
        }
    }
}

impl ClassifierModel for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ModelKind::LogisticRegression { alpha, class_weight } = self.config.kind else {
            panic!(
                "Expected ModelKind::LogisticRegression params, got {:?}",
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

        let params = LogisticRegressionParameters::default().with_alpha(alpha);
        let fitted = LogisticRegression::fit(&to_dense(&x_fit), &y_fit, params)?;

        self.classes = observed_classes(y);
        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let Some(model) = &self.model else {
            bail!("LogisticRegression predict called before fit");
        };
        Ok(model.predict(&to_dense(x))?)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let Some(model) = &self.model else {
            bail!("LogisticRegression predict_proba called before fit");
        };
        if self.classes.len() != 2 {
            bail!(
                "Probability prediction needs a binary label domain, got {} classes",
                self.classes.len()
            );
        }

        // Sigmoid of the decision function; the backend's coefficients map
        // the second (positive) class of the ascending domain.
        let coef = model.coefficients();
        let intercept = *model.intercept().get((0, 0));
        let probs = x
            .outer_iter()
            .map(|row| {
                let z = intercept
                    + row
                        .iter()
                        .enumerate()
                        .map(|(j, &v)| v * *coef.get((0, j)))
                        .sum::<f64>();
                1.0 / (1.0 + (-z).exp())
            })
            .collect();
        Ok(probs)
    }

    fn name(&self) -> &str {
        "Logistic Regression"
    }
}
