//! IO utilities for persisting per-sample prediction results.

pub mod results;

pub use results::{resolve_save_path, write_results, ResultRecord};
