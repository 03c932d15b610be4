//! Performance reporting over a fitted model and held-out data.
use anyhow::Result;
use ndarray::Array2;

use crate::models::ClassifierModel;
use crate::report::plots::{plot_confusion_matrix, plot_probability_histogram};
use crate::stats::ConfusionMatrix;

/// Evaluates a fitted model against held-out features and labels.
///
/// `express` logs a condensed textual report; `visual` additionally builds
/// and shows the performance figures.
pub struct ClassifierEvaluator<'a> {
    model: &'a dyn ClassifierModel,
    x: &'a Array2<f64>,
    y: &'a [i32],
    multiclass: bool,
}

impl<'a> ClassifierEvaluator<'a> {
    pub fn new(
        model: &'a dyn ClassifierModel,
        x: &'a Array2<f64>,
        y: &'a [i32],
        multiclass: bool,
    ) -> Self {
        ClassifierEvaluator {
            model,
            x,
            y,
            multiclass,
        }
    }

    fn confusion(&self) -> Result<ConfusionMatrix> {
        let y_pred = self.model.predict(self.x)?;
        ConfusionMatrix::from_predictions(self.y, &y_pred)
    }

    fn log_summary(&self, cm: &ConfusionMatrix) {
        log::info!(
            "{}: accuracy {:.3} on {} held-out samples",
            self.model.name(),
            cm.accuracy(),
            self.y.len()
        );
        for (class, recall) in cm.classes.iter().zip(cm.recall_per_class()) {
            log::info!("  class {}: recall {:.3}", class, recall);
        }
        log::info!("  macro recall {:.3}", cm.macro_recall());
    }

    /// Condensed textual report: accuracy, per-class recall, macro recall.
    pub fn express(&self) -> Result<()> {
        let cm = self.confusion()?;
        self.log_summary(&cm);
        Ok(())
    }

    /// Builds the performance figures without displaying them. Predictions
    /// run once; the confusion matrix is shared across the summary and the
    /// figure set.
    pub fn figures(&self) -> Result<Vec<plotly::Plot>> {
        let cm = self.confusion()?;
        self.log_summary(&cm);

        let mut figures = vec![plot_confusion_matrix(&cm, self.model.name())];

        // The probability histogram only makes sense for a binary domain.
        if !self.multiclass {
            let probs = self.model.predict_proba(self.x)?;
            if let Ok(plot) =
                plot_probability_histogram(&probs, self.y, "Predicted probability by true class")
            {
                figures.push(plot);
            }
        }
        Ok(figures)
    }

    /// Full visual report. Figures open in the default viewer.
    pub fn visual(&self) -> Result<()> {
        for figure in self.figures()? {
            figure.show();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use std::cell::Cell;

    struct CountingModel {
        predict_calls: Cell<usize>,
    }

    impl ClassifierModel for CountingModel {
        fn fit(&mut self, _x: &Array2<f64>, _y: &[i32]) -> Result<()> {
            Ok(())
        }

        fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
            self.predict_calls.set(self.predict_calls.get() + 1);
            Ok(vec![0; x.nrows()])
        }

        fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
            Ok(vec![0.5; x.nrows()])
        }
    }

    #[test]
    fn figures_predict_once() {
        let model = CountingModel {
            predict_calls: Cell::new(0),
        };
        let x = Array2::zeros((4, 2));
        let y = vec![0, 0, 1, 1];

        let evaluator = ClassifierEvaluator::new(&model, &x, &y, false);
        let figures = evaluator.figures().unwrap();

        assert_eq!(model.predict_calls.get(), 1);
        // Confusion heat map plus the binary probability histogram.
        assert_eq!(figures.len(), 2);
    }

    #[test]
    fn multiclass_figures_skip_histogram() {
        let model = CountingModel {
            predict_calls: Cell::new(0),
        };
        let x = Array2::zeros((3, 2));
        let y = vec![0, 1, 2];

        let evaluator = ClassifierEvaluator::new(&model, &x, &y, true);
        let figures = evaluator.figures().unwrap();

        assert_eq!(model.predict_calls.get(), 1);
        assert_eq!(figures.len(), 1);
    }
}
