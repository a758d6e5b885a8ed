//! Fruit Quality Exploratory Analysis
//!
//! Loads a table of fruit measurements, cleans it, encodes the binary quality
//! label, prints a statistical summary and renders a fixed set of figures,
//! built on Polars and plotters.
//!
//! # Overview
//!
//! One run goes through five stages, always in this order:
//!
//! - **Loading**: CSV into a polars `DataFrame`, with schema inference
//!   fallbacks ([`loader`])
//! - **Cleaning**: coerce `Acidity` to numeric, drop any row holding a
//!   missing value ([`cleaner`])
//! - **Encoding**: `Quality` `"good"`/`"bad"` to `1`/`0`, anything else to
//!   missing ([`encoder`])
//! - **Summary**: description, correlation matrix, skewness and kurtosis of
//!   every numeric column ([`summary`])
//! - **Figures**: histogram, scatter, correlation heatmap, box and violin
//!   plots as SVG files ([`charts`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fruit_eda::{Analysis, EdaConfig};
//!
//! let config = EdaConfig::builder()
//!     .output_dir("figures")
//!     .distribution_column("Crunchiness")
//!     .build()?;
//!
//! let result = Analysis::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         eprintln!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run("apple_quality.csv")?;
//!
//! println!("{}", result.report.summary);
//! for figure in &result.report.figures {
//!     println!("wrote {}", figure.display());
//! }
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use fruit_eda::{ChartRenderer, DataCleaner, LabelEncoder, load_dataset};
//! use fruit_eda::charts::drop_identifier;
//!
//! let df = load_dataset("apple_quality.csv")?;
//! let (df, report) = DataCleaner::default().clean(df)?;
//! let df = LabelEncoder::default().encode(df)?;
//!
//! let renderer = ChartRenderer::new("figures");
//! renderer.plot_heatmap(&drop_identifier(&df, "A_id")?)?;
//! ```

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod summary;
pub mod utils;

pub use charts::{ChartRenderer, drop_identifier};
pub use cleaner::{CleaningReport, DataCleaner};
pub use config::{ConfigValidationError, DEFAULT_INPUT, EdaConfig, EdaConfigBuilder};
pub use encoder::{LabelEncoder, quality_label};
pub use error::{EdaError, Result, ResultExt};
pub use loader::{load_dataset, load_dataset_from_str};
pub use pipeline::{
    Analysis, AnalysisBuilder, AnalysisReport, AnalysisResult, AnalysisStage,
    ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
pub use summary::{
    ColumnDescription, CorrelationMatrix, DescribeReport, MomentReport, StatisticalSummary,
};
