//! Data cleaning.
//!
//! Cleaning is two steps, always in this order:
//! 1. Coerce the numeric-as-text column to `Float64`; unparseable values
//!    become nulls.
//! 2. Drop every row holding a null (or a float NaN) in **any** column.
//!
//! The second step is deliberately coarse: rows with unrelated missing data
//! are dropped too.

mod converters;

use crate::error::{Result, ResultExt};
use crate::utils::require_column;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a cleaning pass did to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows before cleaning
    pub rows_before: usize,
    /// Rows after cleaning
    pub rows_after: usize,
    /// Values of the coerced column that failed to parse
    pub values_coerced: usize,
}

impl CleaningReport {
    /// Number of rows removed.
    pub fn rows_dropped(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Data cleaner bound to the column it coerces.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    coerce_column: String,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new("Acidity")
    }
}

impl DataCleaner {
    /// Create a cleaner coercing `coerce_column` to numeric.
    pub fn new(coerce_column: impl Into<String>) -> Self {
        Self {
            coerce_column: coerce_column.into(),
        }
    }

    /// Coerce the configured column, then drop incomplete rows.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        info!("Performing data cleaning...");
        let rows_before = df.height();

        let (df, values_coerced) = coerce_numeric(df, &self.coerce_column)?;
        let df = drop_missing_rows(df)?;

        let report = CleaningReport {
            rows_before,
            rows_after: df.height(),
            values_coerced,
        };

        if report.rows_dropped() > 0 {
            let pct = (report.rows_dropped() as f64 / rows_before as f64) * 100.0;
            info!(
                "Removed {} rows with missing values ({:.1}%)",
                report.rows_dropped(),
                pct
            );
        } else {
            debug!("No rows with missing values found");
        }

        Ok((df, report))
    }
}

/// Convert `column` to `Float64` in a new table.
///
/// Returns the table and the number of values that could not be parsed.
pub fn coerce_numeric(mut df: DataFrame, column: &str) -> Result<(DataFrame, usize)> {
    require_column(&df, column)?;

    let series = df.column(column)?.as_materialized_series().clone();
    let (converted, coerced) = converters::coerce_to_float(&series)?;
    df.replace(column, converted)
        .context(format!("Replacing coerced column '{column}'"))?;

    if coerced > 0 {
        debug!("Coerced {} unparseable values in '{}' to null", coerced, column);
    }

    Ok((df, coerced))
}

/// Drop every row holding a missing value in any column.
///
/// Float NaN counts as missing, the same as null.
pub fn drop_missing_rows(df: DataFrame) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        match series.dtype() {
            DataType::Float32 | DataType::Float64 => {
                let floats = series.cast(&DataType::Float64)?;
                for (flag, value) in keep.iter_mut().zip(floats.f64()?.into_iter()) {
                    *flag &= value.is_some_and(|v| !v.is_nan());
                }
            }
            _ => {
                let nulls = series.is_null();
                for (flag, is_null) in keep.iter_mut().zip(nulls.into_iter()) {
                    *flag &= !is_null.unwrap_or(false);
                }
            }
        }
    }

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(df.filter(&mask)?)
}
