//! Configuration for the analysis pipeline.
//!
//! The stage order is fixed; configuration only names the file, the output
//! directory and the columns each stage works on. Defaults reproduce the
//! apple-quality analysis.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "apple_quality.csv";

/// Configuration for an analysis run.
///
/// Use [`EdaConfig::builder()`] to create a configuration with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use fruit_eda::EdaConfig;
///
/// let config = EdaConfig::builder()
///     .output_dir("charts")
///     .histogram_column("Crunchiness")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdaConfig {
    /// Directory receiving the rendered figures.
    /// Default: "figures"
    pub output_dir: PathBuf,

    /// Binary label column holding "good"/"bad".
    /// Default: "Quality"
    pub label_column: String,

    /// Column stored as text that must be coerced to numeric.
    /// Default: "Acidity"
    pub coerce_column: String,

    /// Identifier column, dropped before the correlation heatmap.
    /// Default: "A_id"
    pub id_column: String,

    /// Column shown in the histogram.
    /// Default: "Sweetness"
    pub histogram_column: String,

    /// Number of histogram bins.
    /// Default: 30
    pub histogram_bins: usize,

    /// Scatter plot x axis.
    /// Default: "Sweetness"
    pub scatter_x: String,

    /// Scatter plot y axis.
    /// Default: "Weight"
    pub scatter_y: String,

    /// Column shown in the box and violin plots.
    /// Default: "Juiciness"
    pub distribution_column: String,

    /// Whether to render figures at all.
    /// Default: true
    pub render_plots: bool,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("figures"),
            label_column: "Quality".to_string(),
            coerce_column: "Acidity".to_string(),
            id_column: "A_id".to_string(),
            histogram_column: "Sweetness".to_string(),
            histogram_bins: 30,
            scatter_x: "Sweetness".to_string(),
            scatter_y: "Weight".to_string(),
            distribution_column: "Juiciness".to_string(),
            render_plots: true,
        }
    }
}

impl EdaConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EdaConfigBuilder {
        EdaConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBins(self.histogram_bins));
        }

        let columns = [
            ("label_column", &self.label_column),
            ("coerce_column", &self.coerce_column),
            ("id_column", &self.id_column),
            ("histogram_column", &self.histogram_column),
            ("scatter_x", &self.scatter_x),
            ("scatter_y", &self.scatter_y),
            ("distribution_column", &self.distribution_column),
        ];
        for (field, value) in columns {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid histogram bins: {0} (must be at least 1)")]
    InvalidBins(usize),

    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),
}

impl From<ConfigValidationError> for crate::error::EdaError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::EdaError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`EdaConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EdaConfigBuilder {
    output_dir: Option<PathBuf>,
    label_column: Option<String>,
    coerce_column: Option<String>,
    id_column: Option<String>,
    histogram_column: Option<String>,
    histogram_bins: Option<usize>,
    scatter_x: Option<String>,
    scatter_y: Option<String>,
    distribution_column: Option<String>,
    render_plots: Option<bool>,
}

impl EdaConfigBuilder {
    /// Set the directory receiving rendered figures.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the binary label column.
    pub fn label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }

    /// Set the text column coerced to numeric during cleaning.
    pub fn coerce_column(mut self, column: impl Into<String>) -> Self {
        self.coerce_column = Some(column.into());
        self
    }

    /// Set the identifier column excluded from the heatmap.
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    /// Set the histogram column.
    pub fn histogram_column(mut self, column: impl Into<String>) -> Self {
        self.histogram_column = Some(column.into());
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the scatter plot axes.
    pub fn scatter_columns(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.scatter_x = Some(x.into());
        self.scatter_y = Some(y.into());
        self
    }

    /// Set the column shown in the box and violin plots.
    pub fn distribution_column(mut self, column: impl Into<String>) -> Self {
        self.distribution_column = Some(column.into());
        self
    }

    /// Enable or disable figure rendering.
    ///
    /// When false, only the statistical summary is produced.
    pub fn render_plots(mut self, render: bool) -> Self {
        self.render_plots = Some(render);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EdaConfig` or an error if validation fails.
    pub fn build(self) -> Result<EdaConfig, ConfigValidationError> {
        let defaults = EdaConfig::default();
        let config = EdaConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            label_column: self.label_column.unwrap_or(defaults.label_column),
            coerce_column: self.coerce_column.unwrap_or(defaults.coerce_column),
            id_column: self.id_column.unwrap_or(defaults.id_column),
            histogram_column: self.histogram_column.unwrap_or(defaults.histogram_column),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            scatter_x: self.scatter_x.unwrap_or(defaults.scatter_x),
            scatter_y: self.scatter_y.unwrap_or(defaults.scatter_y),
            distribution_column: self
                .distribution_column
                .unwrap_or(defaults.distribution_column),
            render_plots: self.render_plots.unwrap_or(defaults.render_plots),
        };

        config.validate()?;
        Ok(config)
    }
}
