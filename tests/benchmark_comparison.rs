//! Integration tests for the classifier family benchmark.

use lesion_classifiers::benchmark::{run_comparison, BenchmarkOptions};
use ndarray::{Array1, Array2};

/// 60-sample two-class cohort, separable enough that every family learns it.
fn cohort() -> (Array2<f64>, Array1<i32>) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for i in 0..60 {
        let (label, center) = if i < 36 { (0, 0.0) } else { (1, 5.0) };
        let jitter = (i % 11) as f64 * 0.09;
        rows.push(vec![center + jitter, center - jitter]);
        labels.push(label);
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    (
        Array2::from_shape_vec((60, 2), flat).unwrap(),
        Array1::from_vec(labels),
    )
}

fn options() -> BenchmarkOptions {
    BenchmarkOptions {
        n_iterations: 3,
        test_size: 0.2,
        seed: 123,
    }
}

#[test]
fn covers_all_families_with_bounded_recalls() {
    let (x, y) = cohort();
    let scores = run_comparison(&x, &y, &options()).unwrap();

    let mut names: Vec<&str> = scores.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "Decision Tree",
            "K-Nearest Neighbors",
            "Logistic Regression",
            "Random Forest",
            "Voting Classifier"
        ]
    );

    for score in &scores {
        assert_eq!(score.recalls.len(), 3, "{}: one recall per iteration", score.name);
        assert!(
            score.recalls.iter().all(|r| (0.0..=1.0).contains(r)),
            "{}: recalls lie in [0, 1]",
            score.name
        );
        assert!((0.0..=1.0).contains(&score.mean));
        assert!(score.std >= 0.0);
    }
}

#[test]
fn ordering_is_best_first() {
    let (x, y) = cohort();
    let scores = run_comparison(&x, &y, &options()).unwrap();
    for pair in scores.windows(2) {
        assert!(
            pair[0].mean >= pair[1].mean,
            "{} ({:.3}) should not rank below {} ({:.3})",
            pair[0].name,
            pair[0].mean,
            pair[1].name,
            pair[1].mean
        );
    }
}

#[test]
fn fixed_seed_is_deterministic() {
    let (x, y) = cohort();
    let first = run_comparison(&x, &y, &options()).unwrap();
    let second = run_comparison(&x, &y, &options()).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.recalls, b.recalls);
        assert_eq!(a.mean, b.mean);
        assert_eq!(a.std, b.std);
    }
}

#[test]
fn tiny_class_fails_stratification() {
    let x = Array2::from_shape_vec((5, 2), vec![0.0; 10]).unwrap();
    let y = Array1::from_vec(vec![0, 0, 0, 0, 1]);
    assert!(run_comparison(&x, &y, &options()).is_err());
}
