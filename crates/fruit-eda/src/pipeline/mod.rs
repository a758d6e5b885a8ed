//! Pipeline module.
//!
//! The fixed-order analysis run and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{Analysis, AnalysisBuilder, AnalysisReport, AnalysisResult};
pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
