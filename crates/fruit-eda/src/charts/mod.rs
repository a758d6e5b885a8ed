//! Figures.
//!
//! Each `plot_*` operation computes a model from the table, draws it and
//! writes one SVG file into the output directory, returning its path. The
//! file is complete when the call returns: the backend is presented (and
//! flushed) before the path is handed back, and dropped on every error path.
//!
//! | Operation        | File                          |
//! |------------------|-------------------------------|
//! | `plot_histogram` | `histogram_<column>.svg`      |
//! | `plot_scatter`   | `scatter_<x>_<y>.svg`         |
//! | `plot_heatmap`   | `correlation_heatmap.svg`     |
//! | `plot_box`       | `box_<column>.svg`            |
//! | `plot_violin`    | `violin_<column>.svg`         |

pub mod model;
pub mod palette;
pub mod render;

pub use model::{
    BoxModel, BoxStats, HeatmapModel, HistogramBin, HistogramModel, QUALITY_CATEGORIES,
    ScatterGroup, ScatterModel, ViolinModel, ViolinShape,
};

use crate::config::EdaConfig;
use crate::error::{EdaError, Result};
use crate::utils::{require_column, valid_values};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Size of every figure but the heatmap.
pub const FIGURE_SIZE: (u32, u32) = (800, 600);
/// Heatmap size; wider to fit the color bar.
pub const HEATMAP_SIZE: (u32, u32) = (1000, 800);

/// Drop the identifier column before correlating.
///
/// The identifier is numeric but meaningless as a measurement.
pub fn drop_identifier(df: &DataFrame, column: &str) -> Result<DataFrame> {
    require_column(df, column)?;
    Ok(df.drop(column)?)
}

/// Writes figures into one output directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    label_column: String,
    histogram_bins: usize,
}

impl ChartRenderer {
    /// Renderer writing into `output_dir`, grouping by `Quality`, 30 bins.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            label_column: "Quality".to_string(),
            histogram_bins: 30,
        }
    }

    pub fn from_config(config: &EdaConfig) -> Self {
        Self::new(&config.output_dir)
            .with_label_column(&config.label_column)
            .with_histogram_bins(config.histogram_bins)
    }

    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = column.into();
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Histogram of `column` with a density overlay.
    pub fn plot_histogram(&self, df: &DataFrame, column: &str) -> Result<PathBuf> {
        let values = valid_values(df, column)?;
        let model = HistogramModel::build(column, &values, self.histogram_bins)?;
        let path = self.figure_path(&format!("histogram_{}", file_stem(column)))?;

        write_svg(&path, FIGURE_SIZE, "histogram", |root| {
            render::draw_histogram(root, &model)
        })?;
        info!("Saved histogram of '{}' to {}", column, path.display());
        Ok(path)
    }

    /// `y` against `x`, colored by quality.
    pub fn plot_scatter(&self, df: &DataFrame, x: &str, y: &str) -> Result<PathBuf> {
        let model = ScatterModel::build(df, &self.label_column, x, y)?;
        let path = self.figure_path(&format!("scatter_{}_{}", file_stem(x), file_stem(y)))?;

        write_svg(&path, FIGURE_SIZE, "scatter plot", |root| {
            render::draw_scatter(root, &model)
        })?;
        info!("Saved scatter of '{}' vs '{}' to {}", y, x, path.display());
        Ok(path)
    }

    /// Annotated correlation heatmap over every numeric column of `df`.
    ///
    /// Pass the table through [`drop_identifier`] first to keep the
    /// identifier off the axes.
    pub fn plot_heatmap(&self, df: &DataFrame) -> Result<PathBuf> {
        let model = HeatmapModel::build(df)?;
        let path = self.figure_path("correlation_heatmap")?;

        write_svg(&path, HEATMAP_SIZE, "correlation heatmap", |root| {
            render::draw_heatmap(root, &model)
        })?;
        info!(
            "Saved correlation heatmap ({} columns) to {}",
            model.labels().len(),
            path.display()
        );
        Ok(path)
    }

    /// Box plot of `column` for each quality category.
    pub fn plot_box(&self, df: &DataFrame, column: &str) -> Result<PathBuf> {
        let model = BoxModel::build(df, &self.label_column, column)?;
        let path = self.figure_path(&format!("box_{}", file_stem(column)))?;

        write_svg(&path, FIGURE_SIZE, "box plot", |root| {
            render::draw_box(root, &model)
        })?;
        info!("Saved box plot of '{}' to {}", column, path.display());
        Ok(path)
    }

    /// Violin plot of `column` for each quality category.
    pub fn plot_violin(&self, df: &DataFrame, column: &str) -> Result<PathBuf> {
        let model = ViolinModel::build(df, &self.label_column, column)?;
        let path = self.figure_path(&format!("violin_{}", file_stem(column)))?;

        write_svg(&path, FIGURE_SIZE, "violin plot", |root| {
            render::draw_violin(root, &model)
        })?;
        info!("Saved violin plot of '{}' to {}", column, path.display());
        Ok(path)
    }

    fn figure_path(&self, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(format!("{stem}.svg")))
    }
}

/// Draw with `draw` into a new SVG file at `path` and flush it.
fn write_svg<F>(path: &Path, size: (u32, u32), chart: &str, draw: F) -> Result<()>
where
    F: FnOnce(
        &DrawingArea<SVGBackend<'_>, Shift>,
    ) -> std::result::Result<(), DrawingAreaErrorKind<std::io::Error>>,
{
    debug!("Rendering {} ({}x{})", chart, size.0, size.1);
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(&root).map_err(|e| EdaError::render(chart, e))?;
    root.present().map_err(|e| EdaError::render(chart, e))?;
    Ok(())
}

/// Column name made safe for a file name.
fn file_stem(column: &str) -> String {
    column
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
