use plotly::common::{ErrorData, ErrorType, Marker, Orientation};
use plotly::layout::{Axis, Layout};
use plotly::{Bar, HeatMap, Histogram, Plot};

use crate::benchmark::FamilyScore;
use crate::stats::ConfusionMatrix;

/// Horizontal bar chart of mean recall per classifier family, with standard
/// deviation whiskers. `scores` arrives sorted best-first; plotly draws the
/// first category at the bottom, so traces are added in reverse to keep the
/// best family on top. X-axis fixed to [0, 1].
pub fn plot_family_recall(scores: &[FamilyScore], n_iterations: usize) -> Plot {
    let names: Vec<String> = scores.iter().rev().map(|s| s.name.clone()).collect();
    let means: Vec<f64> = scores.iter().rev().map(|s| s.mean).collect();
    let stds: Vec<f64> = scores.iter().rev().map(|s| s.std).collect();

    let trace = Bar::new(means, names)
        .orientation(Orientation::Horizontal)
        .marker(Marker::new().color("#FFA500"))
        .error_x(ErrorData::new(ErrorType::Data).array(stds));

    let layout = Layout::new()
        .title(format!(
            "Classifier Performance Comparison over {} Splits",
            n_iterations
        ))
        .x_axis(
            Axis::new()
                .title("Average Recall (± std)")
                .range(vec![0.0, 1.0]),
        );

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Histogram of predicted probabilities split by true class.
pub fn plot_probability_histogram(probs: &[f64], labels: &[i32], title: &str) -> Result<Plot, String> {
    if probs.len() != labels.len() {
        return Err("Probabilities and labels must have the same length".to_string());
    }

    let mut plot = Plot::new();
    for class in crate::models::observed_classes(labels) {
        let class_probs: Vec<f64> = probs
            .iter()
            .zip(labels.iter())
            .filter(|(_, &l)| l == class)
            .map(|(&p, _)| p)
            .collect();
        plot.add_trace(Histogram::new(class_probs).name(format!("Class {}", class)));
    }

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Predicted probability").range(vec![0.0, 1.0]))
        .y_axis(Axis::new().title("Count"));
    plot.set_layout(layout);
    Ok(plot)
}

/// Confusion-matrix heat map, true classes on the y-axis.
pub fn plot_confusion_matrix(cm: &ConfusionMatrix, title: &str) -> Plot {
    let class_names: Vec<String> = cm.classes.iter().map(|c| c.to_string()).collect();
    let z: Vec<Vec<usize>> = (0..cm.classes.len())
        .map(|i| cm.matrix.row(i).to_vec())
        .collect();

    let trace = HeatMap::new(class_names.clone(), class_names, z);
    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Predicted label"))
        .y_axis(Axis::new().title("True label"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}
