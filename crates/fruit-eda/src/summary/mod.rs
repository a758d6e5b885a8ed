//! Statistical summary of the numeric columns.
//!
//! Four reports are computed over every numeric column, in table order:
//! a description (count, mean, std, min, quartiles, max), the Pearson
//! correlation matrix, per-column skewness and per-column excess kurtosis.
//! [`StatisticalSummary`] prints them in that fixed order, each under its own
//! header.

pub(crate) mod statistics;

use crate::error::Result;
use crate::utils::{column_values, numeric_column_names, valid_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Minimum width of a printed table cell.
const CELL_WIDTH: usize = 12;

// ============================================================================
// Description
// ============================================================================

/// Count, central tendency and spread for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub column: String,
    /// Non-missing values
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1)
    pub std: f64,
    pub min: f64,
    /// 25th percentile
    pub q25: f64,
    /// Median
    pub q50: f64,
    /// 75th percentile
    pub q75: f64,
    pub max: f64,
}

impl ColumnDescription {
    /// Describe a column from its non-missing values.
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Self {
        let sorted = statistics::sorted(values);
        Self {
            column: column.into(),
            count: values.len(),
            mean: statistics::mean(values),
            std: statistics::sample_std(values),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: statistics::quantile_sorted(&sorted, 0.25),
            q50: statistics::quantile_sorted(&sorted, 0.5),
            q75: statistics::quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    fn stat_rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Description of every numeric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescribeReport {
    pub columns: Vec<ColumnDescription>,
}

impl DescribeReport {
    /// Look up a column's description.
    pub fn get(&self, column: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.column == column)
    }
}

impl fmt::Display for DescribeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.column.as_str()).collect();
        let row_labels = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
        let cells: Vec<Vec<f64>> = (0..row_labels.len())
            .map(|row| self.columns.iter().map(|c| c.stat_rows()[row].1).collect())
            .collect();
        write_table(f, &row_labels, &headers, &cells)
    }
}

// ============================================================================
// Correlation
// ============================================================================

/// Symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Row and column labels, in table order
    pub columns: Vec<String>,
    /// Row-major coefficients; `values[i][j]` pairs `columns[i]` with `columns[j]`
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient for a pair of columns.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        Some(self.values[i][j])
    }

    /// Number of columns on each side.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Smallest and largest finite coefficient.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        write_table(f, &labels, &labels, &self.values)
    }
}

// ============================================================================
// Moments
// ============================================================================

/// One value per column (skewness or kurtosis).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentReport {
    pub values: Vec<(String, f64)>,
}

impl MomentReport {
    /// Value for a column.
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| *v)
    }
}

impl fmt::Display for MomentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .values
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        for (name, value) in &self.values {
            writeln!(f, "{:<width$} {:>CELL_WIDTH$}", name, format_value(*value))?;
        }
        Ok(())
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Describe every numeric column.
pub fn describe(df: &DataFrame) -> Result<DescribeReport> {
    let mut columns = Vec::new();
    for name in numeric_column_names(df) {
        let values = valid_values(df, &name)?;
        columns.push(ColumnDescription::from_values(name, &values));
    }
    Ok(DescribeReport { columns })
}

/// Pairwise Pearson correlation of every numeric column.
///
/// The diagonal is exactly 1.0 for a column with at least two distinct
/// values and NaN otherwise.
pub fn correlation(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_column_names(df);
    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| column_values(df, name))
        .collect::<Result<_>>()?;

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = statistics::pearson(&data[i], &data[j]);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

/// Bias-adjusted skewness of every numeric column.
pub fn skewness(df: &DataFrame) -> Result<MomentReport> {
    moment_report(df, statistics::skewness)
}

/// Bias-adjusted excess kurtosis of every numeric column.
pub fn kurtosis(df: &DataFrame) -> Result<MomentReport> {
    moment_report(df, statistics::kurtosis)
}

fn moment_report(df: &DataFrame, moment: fn(&[f64]) -> f64) -> Result<MomentReport> {
    let values = numeric_column_names(df)
        .into_iter()
        .map(|name| -> Result<(String, f64)> {
            let present = valid_values(df, &name)?;
            Ok((name, moment(&present)))
        })
        .collect::<Result<_>>()?;
    Ok(MomentReport { values })
}

/// The four reports, in print order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub description: DescribeReport,
    pub correlation: CorrelationMatrix,
    pub skewness: MomentReport,
    pub kurtosis: MomentReport,
}

impl StatisticalSummary {
    /// Compute all four reports over the numeric columns of `df`.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        debug!("Summarizing {} numeric columns", numeric_column_names(df).len());
        Ok(Self {
            description: describe(df)?,
            correlation: correlation(df)?,
            skewness: skewness(df)?,
            kurtosis: kurtosis(df)?,
        })
    }
}

impl fmt::Display for StatisticalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Description:")?;
        write!(f, "{}", self.description)?;
        writeln!(f, "\nCorrelation:")?;
        write!(f, "{}", self.correlation)?;
        writeln!(f, "\nSkewness:")?;
        write!(f, "{}", self.skewness)?;
        writeln!(f, "\nKurtosis:")?;
        write!(f, "{}", self.kurtosis)
    }
}

// ============================================================================
// Formatting
// ============================================================================

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

/// Right-aligned table with row labels on the left.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    row_labels: &[&str],
    headers: &[&str],
    cells: &[Vec<f64>],
) -> fmt::Result {
    let label_width = row_labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = headers.iter().map(|h| h.len().max(CELL_WIDTH)).collect();

    write!(f, "{:label_width$}", "")?;
    for (header, width) in headers.iter().zip(&widths) {
        write!(f, " {:>width$}", header)?;
    }
    writeln!(f)?;

    for (label, row) in row_labels.iter().zip(cells) {
        write!(f, "{:<label_width$}", label)?;
        for (value, width) in row.iter().zip(&widths) {
            write!(f, " {:>width$}", format_value(*value))?;
        }
        writeln!(f)?;
    }
    Ok(())
}
