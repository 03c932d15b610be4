//! End-to-end training scenarios through `trainer::classify`.

use lesion_classifiers::data_handling::{train_test_split_indices, CohortMetadata};
use lesion_classifiers::trainer::{classify, TrainOptions, TrainedModel};
use ndarray::{Array1, Array2};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 100-sample cohort: 70 non-melanoma (label 0) around the origin, 30
/// melanoma (label 1) well separated, with row-aligned patient ids.
fn cohort() -> (Array2<f64>, Array1<i32>, CohortMetadata) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for i in 0..100 {
        let (label, center) = if i < 70 { (0, 0.0) } else { (1, 6.0) };
        let jitter = (i % 9) as f64 * 0.08;
        rows.push(vec![center + jitter, center - jitter, 0.5 * jitter]);
        labels.push(label);
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let x = Array2::from_shape_vec((100, 3), flat).unwrap();
    let y = Array1::from_vec(labels);
    let metadata = CohortMetadata::new((0..100).map(|i| format!("PAT{:04}", i)).collect());
    (x, y, metadata)
}

fn read_result_csv(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("result file should exist");
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    (headers, records)
}

#[test]
fn binary_run_writes_baseline_results() {
    init_logging();
    let (x, y, metadata) = cohort();
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("results.csv");

    let opts = TrainOptions::default();
    let model = classify(&x, &y, &save_path, &metadata, &opts)
        .unwrap()
        .expect("a fitted model is returned");
    assert!(matches!(model, TrainedModel::Binary(_)));

    let destination = dir.path().join("result_baseline.csv");
    let (headers, records) = read_result_csv(&destination);
    assert_eq!(
        headers,
        vec![
            "patient_id",
            "true_label",
            "predicted_label",
            "predicted_probability"
        ]
    );
    // 20% of 100 samples held out
    assert_eq!(records.len(), 20);

    // The identifier join is lossless and ordered: patient ids equal the
    // metadata restricted to the held-out indices of the seeded split.
    let split = train_test_split_indices(&y.to_vec(), 0.2, true, opts.seed).unwrap();
    let expected_ids: Vec<String> = split
        .test
        .iter()
        .map(|&i| metadata.patient_id[i].clone())
        .collect();
    let actual_ids: Vec<String> = records.iter().map(|r| r[0].to_string()).collect();
    assert_eq!(actual_ids, expected_ids);

    for (row, record) in records.iter().enumerate() {
        let true_label: i32 = record[1].parse().unwrap();
        let predicted: i32 = record[2].parse().unwrap();
        let prob: f64 = record[3].parse().unwrap();
        assert_eq!(true_label, y[split.test[row]]);
        assert!(predicted == 0 || predicted == 1, "label domain respected");
        assert!((0.0..=1.0).contains(&prob), "probability in [0, 1]");
    }
}

/// Three-class variant of the cohort: 50 / 30 / 20 samples around
/// separated centers.
fn multiclass_cohort() -> (Array2<f64>, Array1<i32>, CohortMetadata) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for i in 0..100 {
        let (label, center) = match i {
            0..=49 => (0, 0.0),
            50..=79 => (1, 6.0),
            _ => (2, 12.0),
        };
        let jitter = (i % 9) as f64 * 0.08;
        rows.push(vec![center + jitter, center - jitter, 0.5 * jitter]);
        labels.push(label);
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let x = Array2::from_shape_vec((100, 3), flat).unwrap();
    let y = Array1::from_vec(labels);
    let metadata = CohortMetadata::new((0..100).map(|i| format!("PAT{:04}", i)).collect());
    (x, y, metadata)
}

#[test]
fn multiclass_run_writes_multi_results() {
    init_logging();
    let (x, y, metadata) = multiclass_cohort();
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("results.csv");

    // Multi-part results always land under result/ in the working directory.
    std::fs::create_dir_all("result").unwrap();
    let destination = std::path::Path::new("result/result_baseline_multi.csv");
    let _ = std::fs::remove_file(destination);

    let opts = TrainOptions {
        multiple: true,
        ..Default::default()
    };
    let model = classify(&x, &y, &save_path, &metadata, &opts)
        .unwrap()
        .expect("a fitted model is returned");
    assert!(matches!(model, TrainedModel::Multiclass(_)));

    // The caller's path is ignored entirely in multi-part mode.
    assert!(!dir.path().join("result_baseline.csv").exists());
    assert!(!save_path.exists());

    let (headers, records) = read_result_csv(destination);
    assert_eq!(
        headers,
        vec![
            "patient_id",
            "true_label",
            "predicted_label",
            "predicted_probability"
        ]
    );
    assert_eq!(records.len(), 20);

    // Multi-part splits are unstratified; the identifier join still follows
    // the seeded hold-out indices.
    let split = train_test_split_indices(&y.to_vec(), 0.2, false, opts.seed).unwrap();
    let expected_ids: Vec<String> = split
        .test
        .iter()
        .map(|&i| metadata.patient_id[i].clone())
        .collect();
    let actual_ids: Vec<String> = records.iter().map(|r| r[0].to_string()).collect();
    assert_eq!(actual_ids, expected_ids);

    for record in &records {
        let predicted: i32 = record[2].parse().unwrap();
        assert!((0..=2).contains(&predicted), "label domain respected");
    }

    let _ = std::fs::remove_file(destination);
}

#[test]
fn extended_flag_switches_preset() {
    init_logging();
    let (x, y, metadata) = cohort();
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("results.csv");

    let opts = TrainOptions {
        extended: true,
        ..Default::default()
    };
    classify(&x, &y, &save_path, &metadata, &opts).unwrap();

    assert!(dir.path().join("result_extended.csv").exists());
    assert!(!dir.path().join("result_baseline.csv").exists());
}

#[test]
fn alternate_source_refits_without_writing() {
    init_logging();
    let (x, y, metadata) = cohort();
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("results.csv");

    let opts = TrainOptions {
        new_images: Some("auxiliary".to_string()),
        ..Default::default()
    };
    let model = classify(&x, &y, &save_path, &metadata, &opts)
        .unwrap()
        .expect("the refit model is still returned");

    // no evaluation artifact in this mode
    assert!(!dir.path().join("result_baseline.csv").exists());

    // refit on the full cohort still predicts the training data well
    let pred = model.as_model().predict(&x).unwrap();
    let correct = pred.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
    assert!(correct >= 95);
}

#[test]
fn misaligned_inputs_are_rejected() {
    init_logging();
    let (x, y, metadata) = cohort();
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("results.csv");

    let short_labels = Array1::from_vec(y.to_vec()[..99].to_vec());
    assert!(classify(&x, &short_labels, &save_path, &metadata, &TrainOptions::default()).is_err());

    let short_metadata = CohortMetadata::new(metadata.patient_id[..50].to_vec());
    assert!(classify(&x, &y, &save_path, &short_metadata, &TrainOptions::default()).is_err());
}

#[test]
fn singleton_class_fails_stratified_binary_run() {
    init_logging();
    let (x, _, metadata) = cohort();
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("results.csv");

    let mut labels = vec![0i32; 100];
    labels[99] = 1;
    let y = Array1::from_vec(labels);
    let err = classify(&x, &y, &save_path, &metadata, &TrainOptions::default()).unwrap_err();
    assert!(err.to_string().contains("stratified"));
}
