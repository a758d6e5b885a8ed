//! The analysis run and its builder.
//!
//! Stages always run in the same order: load, clean, encode, summarize,
//! plot. The table moves by value from one stage to the next; the summary and
//! the figures only borrow the encoded table.

use crate::charts::{ChartRenderer, drop_identifier};
use crate::cleaner::{CleaningReport, DataCleaner};
use crate::config::EdaConfig;
use crate::encoder::LabelEncoder;
use crate::error::{EdaError, Result};
use crate::loader::load_dataset;
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::summary::StatisticalSummary;
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Everything a run reports, ready to print or serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Local time the run finished, `%Y-%m-%d %H:%M:%S`
    pub generated_at: String,
    /// Input file, when the run started from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub cleaning: CleaningReport,
    /// Labels outside the vocabulary, now missing
    pub unmapped_labels: usize,
    /// Rows carrying a valid encoded label
    pub labelled_rows: usize,
    pub summary: StatisticalSummary,
    /// Figures written, in render order
    pub figures: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl AnalysisReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Output of a run: the encoded table and the report.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub data: DataFrame,
    pub report: AnalysisReport,
}

/// A configured analysis.
///
/// Use [`Analysis::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use fruit_eda::{Analysis, EdaConfig};
///
/// let analysis = Analysis::builder()
///     .config(EdaConfig::builder().output_dir("out").build()?)
///     .build()?;
/// let result = analysis.run("apple_quality.csv")?;
/// println!("{}", result.report.summary);
/// ```
pub struct Analysis {
    config: EdaConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
    encoder: LabelEncoder,
    renderer: ChartRenderer,
}

static_assertions::assert_impl_all!(Analysis: Send);

impl Analysis {
    pub fn builder() -> AnalysisBuilder {
        AnalysisBuilder::default()
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }

    /// Load `path` and run every stage on it.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let path = path.as_ref();
        let outcome = self
            .load(path)
            .and_then(|df| self.process(df, Some(path)));
        self.finish(outcome)
    }

    /// Run every stage after loading on an in-memory table.
    pub fn run_frame(&self, df: DataFrame) -> Result<AnalysisResult> {
        let outcome = self.process(df, None);
        self.finish(outcome)
    }

    fn finish(&self, outcome: Result<AnalysisResult>) -> Result<AnalysisResult> {
        match outcome {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Analysis completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Analysis error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn load(&self, path: &Path) -> Result<DataFrame> {
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            0.0,
            format!("Loading {}...", path.display()),
        ));
        let df = load_dataset(path)?;
        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            1.0,
            "Dataset loaded",
        ));
        Ok(df)
    }

    fn process(&self, df: DataFrame, input: Option<&Path>) -> Result<AnalysisResult> {
        let start_time = Instant::now();
        if df.height() == 0 {
            return Err(EdaError::EmptyDataset);
        }

        // Cleaning
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Cleaning,
            0.0,
            "Cleaning data...",
        ));
        let (df, cleaning) = self.cleaner.clean(df)?;
        if df.height() == 0 {
            return Err(EdaError::EmptyDataset.with_context("No complete rows left after cleaning"));
        }

        // Encoding
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Encoding,
            0.0,
            "Encoding labels...",
        ));
        let unmapped_labels = self.encoder.unmapped_count(&df)?;
        let df = self.encoder.encode(df)?;
        let labelled_rows = df.height() - df.column(self.encoder.column())?.null_count();
        debug!("{} of {} rows carry a valid label", labelled_rows, df.height());

        // Summary
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Summarizing,
            0.0,
            "Computing statistics...",
        ));
        let summary = StatisticalSummary::compute(&df)?;

        // Figures
        let figures = if self.config.render_plots {
            self.render_figures(&df)?
        } else {
            info!("Figure rendering disabled");
            Vec::new()
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Analysis finished in {} ms", duration_ms);

        Ok(AnalysisResult {
            data: df,
            report: AnalysisReport {
                generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                input: input.map(|p| p.display().to_string()),
                cleaning,
                unmapped_labels,
                labelled_rows,
                summary,
                figures,
                duration_ms,
            },
        })
    }

    fn render_figures(&self, df: &DataFrame) -> Result<Vec<PathBuf>> {
        let config = &self.config;
        let renderer = &self.renderer;

        let plots: [(&str, &dyn Fn() -> Result<PathBuf>); 5] = [
            ("histogram", &|| {
                renderer.plot_histogram(df, &config.histogram_column)
            }),
            ("scatter plot", &|| {
                renderer.plot_scatter(df, &config.scatter_x, &config.scatter_y)
            }),
            ("correlation heatmap", &|| {
                drop_identifier(df, &config.id_column)
                    .and_then(|input| renderer.plot_heatmap(&input))
            }),
            ("box plot", &|| {
                renderer.plot_box(df, &config.distribution_column)
            }),
            ("violin plot", &|| {
                renderer.plot_violin(df, &config.distribution_column)
            }),
        ];

        let total = plots.len();
        let mut figures = Vec::with_capacity(total);
        for (i, (name, plot)) in plots.iter().enumerate() {
            self.report_progress(ProgressUpdate::with_items(
                AnalysisStage::Plotting,
                format!("Figure: {name}"),
                i,
                total,
                format!("Rendering {name}..."),
            ));
            figures.push(plot()?);
        }
        Ok(figures)
    }
}

/// Builder for [`Analysis`].
#[derive(Default)]
pub struct AnalysisBuilder {
    config: Option<EdaConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(AnalysisBuilder: Send);

impl AnalysisBuilder {
    pub fn config(mut self, config: EdaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Receive progress updates through a custom reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Receive progress updates through a closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Validate the configuration and build.
    ///
    /// An invalid configuration is reported as [`EdaError::InvalidConfig`].
    pub fn build(self) -> Result<Analysis> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Analysis {
            cleaner: DataCleaner::new(&config.coerce_column),
            encoder: LabelEncoder::binary_quality(&config.label_column),
            renderer: ChartRenderer::from_config(&config),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn raw_frame() -> DataFrame {
        df![
            "A_id" => [0i64, 1, 2, 3, 4, 5, 6],
            "Sweetness" => [-1.2f64, 0.4, 1.9, 2.2, -0.3, 1.1, 0.8],
            "Weight" => [0.3f64, -1.1, 0.8, 2.4, 0.1, 1.6, -0.4],
            "Juiciness" => [1.0f64, -0.5, 2.1, 1.7, 0.2, 2.8, 0.9],
            "Acidity" => ["0.5", "-1.25", "N/A", "2.0", "0.75", "1.5", "-0.2"],
            "Quality" => ["bad", "bad", "good", "good", "bad", "good", "spoiled"],
        ]
        .unwrap()
    }

    fn summary_only() -> Analysis {
        let config = EdaConfig::builder().render_plots(false).build().unwrap();
        Analysis::builder().config(config).build().unwrap()
    }

    #[test]
    fn test_builder_default() {
        let analysis = Analysis::builder().build().unwrap();
        assert_eq!(analysis.config().label_column, "Quality");
        assert!(analysis.config().render_plots);
        assert!(analysis.progress_reporter.is_none());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let mut config = EdaConfig::default();
        config.histogram_bins = 0;
        let err = Analysis::builder().config(config).build().err().unwrap();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(matches!(err, EdaError::InvalidConfig(msg) if msg.contains("histogram bins")));
    }

    #[test]
    fn test_run_frame_stages() {
        let result = summary_only().run_frame(raw_frame()).unwrap();
        let report = &result.report;

        // the unparseable acidity row goes, the unknown label stays
        assert_eq!(result.data.height(), 6);
        assert_eq!(report.cleaning.rows_before, 7);
        assert_eq!(report.cleaning.values_coerced, 1);
        assert_eq!(report.unmapped_labels, 1);
        assert_eq!(report.labelled_rows, 5);
        assert!(report.figures.is_empty());
        assert!(report.input.is_none());

        assert_eq!(
            result.data.column("Quality").unwrap().dtype(),
            &DataType::Int64
        );
        assert!(report.summary.description.get("Acidity").is_some());
        assert!(report.summary.description.get("Quality").is_some());
    }

    #[test]
    fn test_progress_sequence() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();
        let config = EdaConfig::builder().render_plots(false).build().unwrap();

        Analysis::builder()
            .config(config)
            .on_progress(move |update| stages_clone.lock().unwrap().push(update.stage))
            .build()
            .unwrap()
            .run_frame(raw_frame())
            .unwrap();

        assert_eq!(
            *stages.lock().unwrap(),
            vec![
                AnalysisStage::Cleaning,
                AnalysisStage::Encoding,
                AnalysisStage::Summarizing,
                AnalysisStage::Complete,
            ]
        );
    }

    #[test]
    fn test_run_missing_file_reports_failure() {
        let last = Arc::new(Mutex::new(None));
        let last_clone = last.clone();
        let analysis = Analysis::builder()
            .on_progress(move |update| *last_clone.lock().unwrap() = Some(update.stage))
            .build()
            .unwrap();

        let err = analysis.run("no/such/apple_quality.csv").unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert_eq!(*last.lock().unwrap(), Some(AnalysisStage::Failed));
    }

    #[test]
    fn test_empty_after_cleaning() {
        let df = df![
            "Acidity" => ["N/A", "bad value"],
            "Quality" => ["good", "bad"],
        ]
        .unwrap();
        let err = summary_only().run_frame(df).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }

    #[test]
    fn test_figures_rendered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = EdaConfig::builder()
            .output_dir(dir.path())
            .build()
            .unwrap();
        let result = Analysis::builder()
            .config(config)
            .build()
            .unwrap()
            .run_frame(raw_frame())
            .unwrap();

        let names: Vec<String> = result
            .report
            .figures
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "histogram_sweetness.svg",
                "scatter_sweetness_weight.svg",
                "correlation_heatmap.svg",
                "box_juiciness.svg",
                "violin_juiciness.svg",
            ]
        );
        assert!(result.report.figures.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_missing_identifier_fails_at_heatmap() {
        let dir = tempfile::tempdir().unwrap();
        let config = EdaConfig::builder()
            .output_dir(dir.path())
            .build()
            .unwrap();
        let df = raw_frame().drop("A_id").unwrap();

        let err = Analysis::builder()
            .config(config)
            .build()
            .unwrap()
            .run_frame(df)
            .unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(name) if name == "A_id"));

        // figures before the heatmap are already on disk
        assert!(dir.path().join("histogram_sweetness.svg").exists());
        assert!(dir.path().join("scatter_sweetness_weight.svg").exists());
        assert!(!dir.path().join("correlation_heatmap.svg").exists());
    }

    #[test]
    fn test_report_serializes() {
        let result = summary_only().run_frame(raw_frame()).unwrap();
        let text = result.report.to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["cleaning"]["rows_after"], 6);
        assert_eq!(json["labelled_rows"], 5);
        assert!(json.get("input").is_none());
        assert!(json["summary"]["correlation"].is_object());
    }
}
