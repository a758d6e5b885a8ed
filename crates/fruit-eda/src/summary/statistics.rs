//! Descriptive statistics over plain `f64` slices.
//!
//! Callers strip nulls before calling in. Undefined results (too few values,
//! zero variance for correlation) are `NaN` rather than errors so a single
//! degenerate column never hides the rest of a report.

/// Arithmetic mean; `NaN` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); `NaN` below two values.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Quantile of an ascending slice, interpolating linearly between order
/// statistics.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Copy and sort ascending.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Sums of squared, cubed and fourth-power deviations from the mean.
fn deviation_sums(values: &[f64]) -> (f64, f64, f64) {
    let m = mean(values);
    values.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), v| {
        let d = v - m;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    })
}

/// Bias-adjusted Fisher-Pearson skewness (G1).
///
/// `NaN` below three values, `0.0` for a constant column.
pub(crate) fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }
    let (s2, s3, _) = deviation_sums(values);
    let m2 = s2 / n;
    let m3 = s3 / n;
    if m2 == 0.0 {
        return 0.0;
    }
    ((n * (n - 1.0)).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
}

/// Bias-adjusted excess kurtosis (G2).
///
/// `NaN` below four values, `0.0` for a constant column.
pub(crate) fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return f64::NAN;
    }
    let (s2, _, s4) = deviation_sums(values);
    if s2 == 0.0 {
        return 0.0;
    }
    let numerator = n * (n + 1.0) * (n - 1.0) * s4;
    let denominator = (n - 2.0) * (n - 3.0) * s2 * s2;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    numerator / denominator - adjustment
}

/// Pearson correlation over pairwise-complete observations.
///
/// Pairs where either side is missing or NaN are skipped. `NaN` when fewer
/// than two pairs remain or either side has zero variance.
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (cov, var_x, var_y) = pairs.iter().fold((0.0, 0.0, 0.0), |(c, vx, vy), (a, b)| {
        let dx = a - mean_x;
        let dy = b - mean_y;
        (c + dx * dy, vx + dx * dx, vy + dy * dy)
    });

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    // ==================== mean / std tests ====================

    #[test]
    fn test_mean_and_std_basic() {
        // Mean = 5, sample variance = 32 / 7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < EPS);
        assert!((sample_std(&values) - 2.138089935299395).abs() < EPS);
    }

    #[test]
    fn test_std_single_value_is_nan() {
        assert!(sample_std(&[5.0]).is_nan());
        assert!(mean(&[]).is_nan());
    }

    // ==================== quantile tests ====================

    #[test]
    fn test_quantiles_interpolate() {
        let values = sorted(&[9.0, 2.0, 4.0, 5.0, 4.0, 7.0, 4.0, 5.0]);
        assert_eq!(quantile_sorted(&values, 0.25), 4.0);
        assert_eq!(quantile_sorted(&values, 0.5), 4.5);
        assert_eq!(quantile_sorted(&values, 0.75), 5.5);
        assert_eq!(quantile_sorted(&values, 0.0), 2.0);
        assert_eq!(quantile_sorted(&values, 1.0), 9.0);
    }

    #[test]
    fn test_quantile_single_and_empty() {
        assert_eq!(quantile_sorted(&[3.0], 0.75), 3.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    // ==================== skewness / kurtosis tests ====================

    #[test]
    fn test_skewness_symmetric() {
        assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).abs() < EPS);
    }

    #[test]
    fn test_skewness_right_tail() {
        let skew = skewness(&[1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!((skew - 2.23606797749979).abs() < 1e-9);
    }

    #[test]
    fn test_kurtosis_values() {
        assert!((kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]) + 1.2).abs() < 1e-9);
        assert!((kurtosis(&[1.0, 1.0, 1.0, 1.0, 10.0]) - 5.0).abs() < 1e-9);
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((kurtosis(&values) - 0.940625).abs() < 1e-9);
        assert!((skewness(&values) - 0.8184875533567996).abs() < 1e-9);
    }

    #[test]
    fn test_moments_small_or_constant() {
        assert!(skewness(&[1.0, 2.0]).is_nan());
        assert!(kurtosis(&[1.0, 2.0, 3.0]).is_nan());
        assert_eq!(skewness(&[4.0, 4.0, 4.0]), 0.0);
        assert_eq!(kurtosis(&[4.0, 4.0, 4.0, 4.0]), 0.0);
    }

    // ==================== pearson tests ====================

    #[test]
    fn test_pearson_basic() {
        let r = pearson(&some(&[1.0, 2.0, 3.0, 4.0, 5.0]), &some(&[2.0, 4.0, 5.0, 4.0, 5.0]));
        assert!((r - 0.7745966692414834).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect() {
        let x = some(&[1.0, 2.0, 3.0]);
        assert_eq!(pearson(&x, &x), 1.0);
        let neg = some(&[3.0, 2.0, 1.0]);
        assert_eq!(pearson(&x, &neg), -1.0);
    }

    #[test]
    fn test_pearson_skips_incomplete_pairs() {
        let x = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        let y = vec![Some(2.0), Some(4.0), Some(100.0), Some(6.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_pearson_degenerate() {
        assert!(pearson(&some(&[1.0]), &some(&[2.0])).is_nan());
        assert!(pearson(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])).is_nan());
    }
}
