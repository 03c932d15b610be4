//! Repeated randomized comparison of classifier families.
use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use plotly::Plot;
use std::str::FromStr;

use crate::config::{ClassifierConfig, ModelKind};
use crate::data_handling::{select_labels, select_rows, train_test_split_indices};
use crate::models::factory;
use crate::report::plots::plot_family_recall;
use crate::stats::{macro_recall, mean_std};

/// Options for the benchmark sweep.
#[derive(Debug, Clone)]
pub struct BenchmarkOptions {
    pub n_iterations: usize,
    pub test_size: f64,
    pub seed: u64,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        BenchmarkOptions {
            n_iterations: 100,
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Aggregated recall of one classifier family over all iterations.
#[derive(Debug, Clone)]
pub struct FamilyScore {
    pub name: String,
    pub mean: f64,
    pub std: f64,
    pub recalls: Vec<f64>,
}

fn benchmark_families() -> Vec<(&'static str, ModelKind)> {
    // Unwraps are over fixed preset names.
    vec![
        ("Decision Tree", ModelKind::from_str("decision_tree").unwrap()),
        (
            "K-Nearest Neighbors",
            ModelKind::from_str("k_nearest_neighbors").unwrap(),
        ),
        (
            "Logistic Regression",
            ModelKind::from_str("logistic_regression").unwrap(),
        ),
        ("Random Forest", ModelKind::from_str("random_forest").unwrap()),
        ("Voting Classifier", ModelKind::from_str("voting").unwrap()),
    ]
}

/// Evaluate every classifier family over `n_iterations` stratified splits and
/// return per-family mean/std macro recall, ordered by descending mean.
///
/// Iteration `i` splits with seed `base + i` and builds every model fresh
/// from the factory with the same seed, so no fitted state leaks between
/// families or iterations and two invocations with the same options produce
/// identical scores.
pub fn run_comparison(
    x: &Array2<f64>,
    y: &Array1<i32>,
    opts: &BenchmarkOptions,
) -> Result<Vec<FamilyScore>> {
    let families = benchmark_families();
    let y_all = y.to_vec();
    let mut scores: Vec<(&'static str, Vec<f64>)> =
        families.iter().map(|(name, _)| (*name, Vec::new())).collect();

    for i in 0..opts.n_iterations {
        let iter_seed = opts.seed + i as u64;
        let split = train_test_split_indices(&y_all, opts.test_size, true, iter_seed)
            .with_context(|| format!("Stratified split failed at iteration {}", i))?;

        let x_train = select_rows(x, &split.train);
        let y_train = select_labels(y, &split.train).to_vec();
        let x_test = select_rows(x, &split.test);
        let y_test = select_labels(y, &split.test).to_vec();

        for ((name, kind), (_, recalls)) in families.iter().zip(scores.iter_mut()) {
            let mut model = factory::build_model(&ClassifierConfig::new(iter_seed, kind.clone()));
            model
                .fit(&x_train, &y_train)
                .with_context(|| format!("{} failed to fit at iteration {}", name, i))?;
            let y_pred = model.predict(&x_test)?;
            recalls.push(macro_recall(&y_test, &y_pred)?);
        }

        log::debug!("Benchmark iteration {}/{} done", i + 1, opts.n_iterations);
    }

    let mut out: Vec<FamilyScore> = scores
        .into_iter()
        .map(|(name, recalls)| {
            let (mean, std) = mean_std(&recalls);
            FamilyScore {
                name: name.to_string(),
                mean,
                std,
                recalls,
            }
        })
        .collect();
    // Best-performing family first.
    out.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(std::cmp::Ordering::Equal));

    for score in &out {
        log::info!(
            "{}: mean recall {:.3} (± {:.3}) over {} splits",
            score.name,
            score.mean,
            score.std,
            opts.n_iterations
        );
    }

    Ok(out)
}

/// Run the comparison and build the ranking chart. Rendering is left to the
/// caller; the plot is not persisted here.
pub fn compare_classifiers(
    x: &Array2<f64>,
    y: &Array1<i32>,
    opts: &BenchmarkOptions,
) -> Result<Plot> {
    let scores = run_comparison(x, y, opts)?;
    Ok(plot_family_recall(&scores, opts.n_iterations))
}
