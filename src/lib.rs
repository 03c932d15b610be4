//! lesion-classifiers: classifier training and evaluation for dermoscopic
//! lesion features.
//!
//! This crate orchestrates an external model backend (`smartcore`) to train
//! binary (melanoma / non-melanoma) or multiclass diagnostic classifiers over
//! tabular feature data, score held-out samples, persist per-sample results
//! as csv, and benchmark several off-the-shelf classifier families over
//! repeated randomized splits.
//!
//! The design favors small, testable modules: model wrappers behind the
//! `ClassifierModel` trait, a factory keyed by `ModelKind`, and explicit
//! seeds threaded through every randomized operation so outputs are
//! reproducible without hidden global state.
pub mod benchmark;
pub mod config;
pub mod data_handling;
pub mod evaluator;
pub mod io;
pub mod models;
pub mod predictor;
pub mod report;
pub mod stats;
pub mod trainer;
