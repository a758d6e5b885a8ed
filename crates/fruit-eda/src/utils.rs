//! Shared helpers for reading columns out of a polars `DataFrame`.

use crate::error::{EdaError, Result};
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of all numeric columns, in table order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

// =============================================================================
// Column Access
// =============================================================================

/// Fail with [`EdaError::ColumnNotFound`] unless `name` is a column of `df`.
pub fn require_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.get_column_index(name).is_none() {
        return Err(EdaError::ColumnNotFound(name.to_string()));
    }
    Ok(())
}

/// Read a numeric column as `f64`, keeping nulls as `None`.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    require_column(df, name)?;
    let series = df.column(name)?.as_materialized_series();
    if !is_numeric_dtype(series.dtype()) {
        return Err(EdaError::TypeConversionFailed {
            column: name.to_string(),
            target_type: "Float64".to_string(),
            reason: format!("column has non-numeric dtype {}", series.dtype()),
        });
    }
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Read a numeric column as `f64`, skipping nulls and NaNs.
pub fn valid_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(column_values(df, name)?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_numeric_column_names_keeps_order() {
        let df = df![
            "A_id" => [1i64, 2],
            "Quality" => ["good", "bad"],
            "Size" => [0.5f64, -1.2],
        ]
        .unwrap();
        assert_eq!(numeric_column_names(&df), vec!["A_id", "Size"]);
    }

    #[test]
    fn test_column_values_keeps_nulls() {
        let df = df!["Weight" => [Some(1.0f64), None, Some(3.0)]].unwrap();
        let values = column_values(&df, "Weight").unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(valid_values(&df, "Weight").unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_column_values_casts_integers() {
        let df = df!["Quality" => [1i64, 0, 1]].unwrap();
        assert_eq!(valid_values(&df, "Quality").unwrap(), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_column() {
        let df = df!["Size" => [1.0f64]].unwrap();
        let err = column_values(&df, "Weight").unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(name) if name == "Weight"));
    }

    #[test]
    fn test_string_column_rejected() {
        let df = df!["Quality" => ["good"]].unwrap();
        let err = column_values(&df, "Quality").unwrap_err();
        assert_eq!(err.error_code(), "TYPE_CONVERSION_FAILED");
    }
}
