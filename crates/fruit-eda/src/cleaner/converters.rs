//! Numeric coercion for text columns.

use crate::error::{EdaError, Result};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;

/// Parse one text value strictly as `f64`.
///
/// Surrounding whitespace is ignored. Anything else that does not parse,
/// including `NaN` spellings, yields `None`.
pub(crate) fn parse_strict(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

/// Convert a series to `Float64`, turning unparseable entries into nulls.
///
/// Returns the converted series and how many non-null inputs became null.
pub(crate) fn coerce_to_float(series: &Series) -> Result<(Series, usize)> {
    match series.dtype() {
        DataType::String => {
            let str_series = series.str()?;
            let mut coerced = 0usize;
            let values: Vec<Option<f64>> = str_series
                .into_iter()
                .map(|opt_val| match opt_val {
                    Some(val) => {
                        let parsed = parse_strict(val);
                        if parsed.is_none() {
                            coerced += 1;
                        }
                        parsed
                    }
                    None => None,
                })
                .collect();

            Ok((Series::new(series.name().clone(), values), coerced))
        }
        dtype if is_numeric_dtype(dtype) => Ok((series.cast(&DataType::Float64)?, 0)),
        dtype => Err(EdaError::TypeConversionFailed {
            column: series.name().to_string(),
            target_type: "Float64".to_string(),
            reason: format!("unsupported source dtype {dtype}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(series: &Series) -> Vec<Option<f64>> {
        series.f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(parse_strict("2.5"), Some(2.5));
        assert_eq!(parse_strict("  -0.491590483 "), Some(-0.491590483));
        assert_eq!(parse_strict("1e3"), Some(1000.0));
        assert_eq!(parse_strict("N/A"), None);
        assert_eq!(parse_strict(""), None);
        assert_eq!(parse_strict("NaN"), None);
        assert_eq!(parse_strict("$12"), None);
    }

    #[test]
    fn test_coerce_string_column() {
        let series = Series::new("Acidity".into(), &[Some("1.5"), Some("N/A"), None, Some("-2")]);
        let (converted, coerced) = coerce_to_float(&series).unwrap();

        assert_eq!(converted.dtype(), &DataType::Float64);
        assert_eq!(converted.name().as_str(), "Acidity");
        assert_eq!(floats(&converted), vec![Some(1.5), None, None, Some(-2.0)]);
        // the pre-existing null is not counted as a coercion
        assert_eq!(coerced, 1);
    }

    #[test]
    fn test_coerce_numeric_column_is_cast() {
        let series = Series::new("Acidity".into(), &[1i64, 2, 3]);
        let (converted, coerced) = coerce_to_float(&series).unwrap();
        assert_eq!(floats(&converted), vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(coerced, 0);
    }

    #[test]
    fn test_coerce_boolean_column_rejected() {
        let series = Series::new("flag".into(), &[true, false]);
        let err = coerce_to_float(&series).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_CONVERSION_FAILED");
    }
}
