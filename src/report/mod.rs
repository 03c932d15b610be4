//! Figure builders for evaluation and benchmarking output.

pub mod plots;
