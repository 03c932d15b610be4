//! Data structures and helpers for sample cohorts.
//!
//! This module defines `CohortMetadata` and contains the seeded train/test
//! index splitting and class-balancing helpers used by the trainer and the
//! benchmark loop. Splits operate on row indices so callers can join results
//! back to row-aligned metadata without loss.
use anyhow::{bail, Result};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Row-aligned auxiliary information about the samples in a cohort.
///
/// `patient_id[i]` identifies the sample in row `i` of the feature table.
#[derive(Debug, Clone)]
pub struct CohortMetadata {
    pub patient_id: Vec<String>,
}

impl CohortMetadata {
    pub fn new(patient_id: Vec<String>) -> Self {
        CohortMetadata { patient_id }
    }

    pub fn len(&self) -> usize {
        self.patient_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patient_id.is_empty()
    }

    pub fn filter_by_indices(&self, indices: &[usize]) -> CohortMetadata {
        CohortMetadata {
            patient_id: indices.iter().map(|&i| self.patient_id[i].clone()).collect(),
        }
    }
}

/// Row indices of a train/test partition. Both sides are sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition row indices into train and test sets.
///
/// When `stratify` is set the class-label proportions of `y` are preserved on
/// both sides; each class contributes `round(count * test_size)` rows to the
/// test set, clamped so neither side loses the class entirely.
///
/// # Errors
///
/// Fails when `test_size` is outside (0, 1), when there are too few rows to
/// populate both sides, or when a class has fewer than 2 members while
/// stratification is requested.
pub fn train_test_split_indices(
    y: &[i32],
    test_size: f64,
    stratify: bool,
    seed: u64,
) -> Result<SplitIndices> {
    if !(test_size > 0.0 && test_size < 1.0) {
        bail!("test_size must lie in (0, 1), got {}", test_size);
    }
    let n_samples = y.len();
    if n_samples < 2 {
        bail!("Need at least 2 samples to split, got {}", n_samples);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    if stratify {
        // BTreeMap keeps class iteration order stable across runs.
        let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            by_class.entry(label).or_default().push(i);
        }
        for (label, mut indices) in by_class {
            if indices.len() < 2 {
                bail!(
                    "Class {} has only {} member(s); stratified splitting needs at least 2",
                    label,
                    indices.len()
                );
            }
            indices.shuffle(&mut rng);
            let n_test = ((indices.len() as f64 * test_size).round() as usize)
                .clamp(1, indices.len() - 1);
            test.extend_from_slice(&indices[..n_test]);
            train.extend_from_slice(&indices[n_test..]);
        }
    } else {
        let mut indices: Vec<usize> = (0..n_samples).collect();
        indices.shuffle(&mut rng);
        let n_test = ((n_samples as f64 * test_size).round() as usize).clamp(1, n_samples - 1);
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    log::debug!(
        "Split {} samples into {} train / {} test (stratify={}, seed={})",
        n_samples,
        train.len(),
        test.len(),
        stratify,
        seed
    );

    Ok(SplitIndices { train, test })
}

/// Row indices realizing balanced class weighting by oversampling.
///
/// Every minority class is resampled with replacement up to the majority
/// class count. The returned indices contain each original row at least once,
/// so no sample is dropped.
pub fn balanced_sample_indices(y: &[i32], seed: u64) -> Vec<usize> {
    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, &label) in y.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }
    let max_count = by_class.values().map(Vec::len).max().unwrap_or(0);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for indices in by_class.values() {
        out.extend_from_slice(indices);
        for _ in indices.len()..max_count {
            // Safe: by_class never stores empty groups.
            out.push(*indices.choose(&mut rng).unwrap());
        }
    }
    out
}

/// Select rows of a feature table by index.
pub fn select_rows(x: &Array2<f64>, indices: &[usize]) -> Array2<f64> {
    x.select(Axis(0), indices)
}

/// Select entries of a label table by index.
pub fn select_labels(y: &Array1<i32>, indices: &[usize]) -> Array1<i32> {
    y.select(Axis(0), indices)
}
