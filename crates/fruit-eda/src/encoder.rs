//! Label encoding for the binary quality column.
//!
//! Values are looked up exactly in the vocabulary. Anything outside it,
//! including values that were already null, becomes null. Encoded nulls are
//! not dropped here: a row with an unknown label survives cleaning (which runs
//! first) and reaches the summary with a missing label.

use crate::error::{EdaError, Result, ResultExt};
use crate::utils::require_column;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Label printed for encoded value 0.
pub const BAD_LABEL: &str = "Bad";
/// Label printed for encoded value 1.
pub const GOOD_LABEL: &str = "Good";

/// Maps a categorical text column to integer codes.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    column: String,
    mapping: HashMap<String, i64>,
}

impl Default for LabelEncoder {
    fn default() -> Self {
        Self::binary_quality("Quality")
    }
}

impl LabelEncoder {
    /// Create an encoder with an explicit vocabulary.
    pub fn new(column: impl Into<String>, mapping: HashMap<String, i64>) -> Self {
        Self {
            column: column.into(),
            mapping,
        }
    }

    /// The `{"good": 1, "bad": 0}` encoder for `column`.
    pub fn binary_quality(column: impl Into<String>) -> Self {
        let mapping = HashMap::from([("good".to_string(), 1), ("bad".to_string(), 0)]);
        Self::new(column, mapping)
    }

    /// Name of the encoded column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Encode a single value.
    pub fn encode_value(&self, value: Option<&str>) -> Option<i64> {
        value.and_then(|v| self.mapping.get(v).copied())
    }

    /// Count values of the column that fall outside the vocabulary.
    ///
    /// Nulls are not counted.
    pub fn unmapped_count(&self, df: &DataFrame) -> Result<usize> {
        let labels = self.labels(df)?;
        Ok(labels
            .into_iter()
            .flatten()
            .filter(|v| !self.mapping.contains_key(*v))
            .count())
    }

    /// Replace the column with its `Int64` codes in a new table.
    pub fn encode(&self, mut df: DataFrame) -> Result<DataFrame> {
        info!("Encoding '{}' column...", self.column);

        let unmapped = self.unmapped_count(&df)?;
        let codes: Vec<Option<i64>> = self
            .labels(&df)?
            .into_iter()
            .map(|v| self.encode_value(v))
            .collect();

        let encoded = Series::new(self.column.as_str().into(), codes);
        df.replace(&self.column, encoded)
            .context(format!("Replacing encoded column '{}'", self.column))?;

        if unmapped > 0 {
            warn!(
                "{} values in '{}' are outside the vocabulary and were set to missing",
                unmapped, self.column
            );
        } else {
            debug!("All '{}' values encoded", self.column);
        }

        Ok(df)
    }

    fn labels<'a>(&self, df: &'a DataFrame) -> Result<&'a StringChunked> {
        require_column(df, &self.column)?;
        let series = df.column(&self.column)?.as_materialized_series();
        if series.dtype() != &DataType::String {
            return Err(EdaError::TypeConversionFailed {
                column: self.column.clone(),
                target_type: "Int64".to_string(),
                reason: format!("expected text labels, found dtype {}", series.dtype()),
            });
        }
        Ok(series.str()?)
    }
}

/// Display label for an encoded quality code.
pub fn quality_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some(BAD_LABEL),
        1 => Some(GOOD_LABEL),
        _ => None,
    }
}
