//! Held-out scoring, evaluation and result persistence.
use std::path::Path;

use anyhow::{bail, Result};
use ndarray::Array2;

use crate::data_handling::CohortMetadata;
use crate::evaluator::ClassifierEvaluator;
use crate::io::{resolve_save_path, write_results, ResultRecord};
use crate::models::ClassifierModel;
use crate::trainer::TrainOptions;

/// Score held-out rows with a fitted model, report metrics, and persist the
/// result table.
///
/// `test_indices` are the held-out row positions in the original cohort;
/// patient identifiers are joined from `metadata` by those indices, so the
/// result table has exactly one row per held-out sample, in index order.
pub fn predict_holdout(
    model: &dyn ClassifierModel,
    x_test: &Array2<f64>,
    y_test: &[i32],
    test_indices: &[usize],
    metadata: &CohortMetadata,
    save_path: &Path,
    opts: &TrainOptions,
) -> Result<()> {
    if x_test.nrows() != y_test.len() || y_test.len() != test_indices.len() {
        bail!(
            "Held-out features ({}), labels ({}) and indices ({}) must be row-aligned",
            x_test.nrows(),
            y_test.len(),
            test_indices.len()
        );
    }

    let probs = model.predict_proba(x_test)?;
    let y_pred = model.predict(x_test)?;

    let evaluator = ClassifierEvaluator::new(model, x_test, y_test, opts.multiple);
    if opts.plots {
        evaluator.visual()?;
    } else {
        evaluator.express()?;
    }

    let held_out = metadata.filter_by_indices(test_indices);
    let records: Vec<ResultRecord> = held_out
        .patient_id
        .iter()
        .enumerate()
        .map(|(row, patient_id)| ResultRecord {
            patient_id: patient_id.clone(),
            true_label: y_test[row],
            predicted_label: y_pred[row],
            predicted_probability: probs[row],
        })
        .collect();

    let destination = resolve_save_path(save_path, opts.extended, opts.multiple);
    write_results(&destination, &records)?;
    log::info!("Results saved to: {}", destination.display());

    Ok(())
}
