//! Progress reporting for an analysis run.
//!
//! # Example
//!
//! ```rust,ignore
//! use fruit_eda::Analysis;
//!
//! let result = Analysis::builder()
//!     .on_progress(|update| {
//!         eprintln!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run("apple_quality.csv")?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of an analysis run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Reading the input file
    Loading,
    /// Coercing the numeric-as-text column and dropping incomplete rows
    Cleaning,
    /// Encoding the quality labels
    Encoding,
    /// Computing the statistical reports
    Summarizing,
    /// Rendering figures
    Plotting,
    /// Run finished successfully
    Complete,
    /// Run stopped on an error
    Failed,
}

impl AnalysisStage {
    /// Human-readable stage name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Cleaning => "Cleaning Data",
            Self::Encoding => "Encoding Labels",
            Self::Summarizing => "Summarizing",
            Self::Plotting => "Rendering Figures",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the whole run spent in this stage (0.0 - 1.0).
    ///
    /// Working stages sum to 1.0; terminal stages weigh nothing.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.15,
            Self::Cleaning => 0.10,
            Self::Encoding => 0.05,
            Self::Summarizing => 0.20,
            Self::Plotting => 0.50,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Overall progress when this stage starts.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Cleaning => 0.15,
            Self::Encoding => 0.25,
            Self::Summarizing => 0.30,
            Self::Plotting => 0.50,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// One progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: AnalysisStage,

    /// Finer position inside the stage, e.g. `"Figure: box plot"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_stage: Option<String>,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within the current stage (0.0 - 1.0)
    pub stage_progress: f32,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_total: Option<usize>,
}

impl ProgressUpdate {
    pub fn new(stage: AnalysisStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            sub_stage: None,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    /// Update for item `current` of `total` within a stage.
    pub fn with_items(
        stage: AnalysisStage,
        sub_stage: impl Into<String>,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        let stage_progress = if total > 0 {
            current as f32 / total as f32
        } else {
            0.0
        };
        Self {
            sub_stage: Some(sub_stage.into()),
            items_processed: Some(current),
            items_total: Some(total),
            ..Self::new(stage, stage_progress, message)
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(AnalysisStage::Complete, 1.0, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(AnalysisStage::Failed, 0.0, message)
    }
}

/// Receives progress updates from a run.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
static_assertions::assert_impl_all!(AnalysisStage: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WORKING_STAGES: [AnalysisStage; 5] = [
        AnalysisStage::Loading,
        AnalysisStage::Cleaning,
        AnalysisStage::Encoding,
        AnalysisStage::Summarizing,
        AnalysisStage::Plotting,
    ];

    #[test]
    fn test_stage_weights_sum() {
        let total: f32 = WORKING_STAGES.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_base_progress_is_cumulative() {
        let mut expected = 0.0f32;
        for stage in WORKING_STAGES {
            assert!((stage.base_progress() - expected).abs() < 1e-6, "{stage:?}");
            expected += stage.weight();
        }
        assert!((AnalysisStage::Complete.base_progress() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(AnalysisStage::Plotting, 0.5, "Plotting...");
        assert_eq!(update.stage, AnalysisStage::Plotting);
        assert!((update.progress - 0.75).abs() < 1e-6);
        assert_eq!(update.stage_progress, 0.5);
        assert!(update.sub_stage.is_none());
    }

    #[test]
    fn test_progress_update_with_items() {
        let update = ProgressUpdate::with_items(
            AnalysisStage::Plotting,
            "Figure: box plot",
            2,
            5,
            "Rendering box plot",
        );
        assert_eq!(update.sub_stage.as_deref(), Some("Figure: box plot"));
        assert_eq!(update.items_processed, Some(2));
        assert_eq!(update.items_total, Some(5));
        assert!((update.stage_progress - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_updates() {
        let done = ProgressUpdate::complete("Done");
        assert_eq!(done.stage, AnalysisStage::Complete);
        assert_eq!(done.progress, 1.0);

        let failed = ProgressUpdate::failed("File not found");
        assert_eq!(failed.stage, AnalysisStage::Failed);
        assert_eq!(failed.message, "File not found");
    }

    #[test]
    fn test_closure_reporter_counts_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let reporter = ClosureProgressReporter::new(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(AnalysisStage::Loading, 0.0, "Loading"));
        reporter.report(ProgressUpdate::complete("Done"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stage_json_values() {
        let expectations = [
            (AnalysisStage::Loading, "\"loading\""),
            (AnalysisStage::Summarizing, "\"summarizing\""),
            (AnalysisStage::Plotting, "\"plotting\""),
            (AnalysisStage::Failed, "\"failed\""),
        ];
        for (stage, expected) in expectations {
            assert_eq!(serde_json::to_string(&stage).unwrap(), expected);
        }

        let json = serde_json::to_string(&ProgressUpdate::new(
            AnalysisStage::Cleaning,
            1.0,
            "Cleaned",
        ))
        .unwrap();
        assert!(json.contains("\"stage\":\"cleaning\""));
        assert!(!json.contains("sub_stage"));
    }
}
