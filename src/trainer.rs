//! Training orchestration: split, fit, then evaluate or benchmark.
use std::path::Path;

use anyhow::{bail, Result};
use ndarray::{Array1, Array2};

use crate::benchmark::{compare_classifiers, BenchmarkOptions};
use crate::config::ClassifierConfig;
use crate::data_handling::{select_labels, select_rows, train_test_split_indices, CohortMetadata};
use crate::models::forest::ForestClassifier;
use crate::models::logistic::LogisticClassifier;
use crate::models::ClassifierModel;
use crate::predictor::predict_holdout;

/// Mode flags for a training run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Use the extended feature set's destination preset.
    pub extended: bool,
    /// Multiclass diagnostic classification instead of binary melanoma.
    pub multiple: bool,
    /// Produce the full visual evaluation report.
    pub plots: bool,
    /// Benchmark classifier families instead of training a model.
    pub testing: bool,
    /// Marker for an alternate data source; when set, the model is refit on
    /// the entire input and held-out evaluation is skipped.
    pub new_images: Option<String>,
    /// Seed for the train/test split and all model-level randomness.
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            extended: false,
            multiple: false,
            plots: false,
            testing: false,
            new_images: None,
            seed: 42,
        }
    }
}

/// A fitted classifier, tagged by task.
#[derive(Debug)]
pub enum TrainedModel {
    Binary(LogisticClassifier),
    Multiclass(ForestClassifier),
}

impl TrainedModel {
    pub fn as_model(&self) -> &dyn ClassifierModel {
        match self {
            TrainedModel::Binary(m) => m,
            TrainedModel::Multiclass(m) => m,
        }
    }

    fn as_model_mut(&mut self) -> &mut dyn ClassifierModel {
        match self {
            TrainedModel::Binary(m) => m,
            TrainedModel::Multiclass(m) => m,
        }
    }
}

/// Train a classifier over the cohort and produce its output artifacts.
///
/// Branches on the mode flags: `testing` short-circuits into the classifier
/// family benchmark (30 iterations, no model is returned); otherwise the data
/// is split 80/20 with the options' seed, a balanced random forest
/// (`multiple`) or balanced logistic regression is fit on the training split,
/// and the held-out rows are scored and persisted. When `new_images` is set
/// the model is refit on the entire input instead and nothing is evaluated or
/// written, a sampling-efficiency tradeoff for small auxiliary datasets.
///
/// The 80/20 split is stratified by label except in `multiple` mode. The
/// skipped multiclass stratification is a deliberate carry-over from the
/// source system, not an oversight.
pub fn classify(
    x_all: &Array2<f64>,
    y_all: &Array1<i32>,
    save_path: &Path,
    metadata: &CohortMetadata,
    opts: &TrainOptions,
) -> Result<Option<TrainedModel>> {
    if x_all.nrows() != y_all.len() {
        bail!(
            "Feature table has {} rows but label table has {}",
            x_all.nrows(),
            y_all.len()
        );
    }
    if metadata.len() != x_all.nrows() {
        bail!(
            "Metadata has {} rows but feature table has {}",
            metadata.len(),
            x_all.nrows()
        );
    }

    if opts.testing {
        let bench_opts = BenchmarkOptions {
            n_iterations: 30,
            seed: opts.seed,
            ..Default::default()
        };
        compare_classifiers(x_all, y_all, &bench_opts)?.show();
        return Ok(None);
    }

    let y_vec = y_all.to_vec();
    let split = train_test_split_indices(&y_vec, 0.2, !opts.multiple, opts.seed)?;

    let x_train = select_rows(x_all, &split.train);
    let y_train = select_labels(y_all, &split.train).to_vec();

    let mut model = if opts.multiple {
        TrainedModel::Multiclass(ForestClassifier::new(ClassifierConfig::multiclass_default(
            opts.seed,
        )))
    } else {
        TrainedModel::Binary(LogisticClassifier::new(ClassifierConfig::binary_default(
            opts.seed,
        )))
    };
    log::info!(
        "Training {} on {} samples ({} held out)",
        model.as_model().name(),
        split.train.len(),
        split.test.len()
    );
    model.as_model_mut().fit(&x_train, &y_train)?;

    if opts.new_images.is_some() {
        // Alternate data sources are small; use every sample for the final
        // fit and skip held-out evaluation.
        model.as_model_mut().fit(x_all, &y_vec)?;
    } else {
        let x_test = select_rows(x_all, &split.test);
        let y_test = select_labels(y_all, &split.test).to_vec();
        predict_holdout(
            model.as_model(),
            &x_test,
            &y_test,
            &split.test,
            metadata,
            save_path,
            opts,
        )?;
    }

    Ok(Some(model))
}
