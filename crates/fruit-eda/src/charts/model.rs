//! Chart data, computed before any drawing happens.
//!
//! Each figure has a model holding exactly what gets drawn: bins and the
//! density curve for the histogram, per-category points for the scatter,
//! the labelled matrix for the heatmap, quartiles and whiskers for the box
//! plot, outlines and quartile lines for the violin plot. Models are plain
//! data and are tested without a drawing backend.

use crate::encoder::{BAD_LABEL, GOOD_LABEL};
use crate::error::{EdaError, Result};
use crate::summary::statistics::{quantile_sorted, sample_std, sorted};
use crate::summary::{CorrelationMatrix, correlation};
use crate::utils::column_values;
use polars::prelude::*;
use std::f64::consts::PI;

/// Encoded quality codes and their labels, in axis order.
pub const QUALITY_CATEGORIES: [(i64, &str); 2] = [(0, BAD_LABEL), (1, GOOD_LABEL)];

/// Points on the histogram density curve.
const HISTOGRAM_KDE_POINTS: usize = 200;
/// Points on each violin outline.
const VIOLIN_GRID_POINTS: usize = 100;
/// Violin support extends this many bandwidths past the data.
const VIOLIN_CUT: f64 = 2.0;
/// Half the width of a category slot taken by a box or violin.
pub(crate) const CATEGORY_HALF_WIDTH: f64 = 0.4;

// ============================================================================
// Kernel density
// ============================================================================

/// Scott's rule bandwidth; `None` when the data cannot support a density.
pub(crate) fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values);
    if std == 0.0 || !std.is_finite() {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// Gaussian kernel density of `values` at each grid point.
pub(crate) fn gaussian_kde(values: &[f64], bandwidth: f64, grid: &[f64]) -> Vec<f64> {
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    grid.iter()
        .map(|&x| {
            values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// `n` evenly spaced points from `start` to `end` inclusive.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Values of `column` split by encoded quality: index 0 is `Bad`, 1 is
/// `Good`. Rows with a missing label, a missing value or any other code are
/// left out.
pub(crate) fn values_by_quality(
    df: &DataFrame,
    label_column: &str,
    column: &str,
) -> Result<[Vec<f64>; 2]> {
    let codes = column_values(df, label_column)?;
    let values = column_values(df, column)?;

    let mut groups: [Vec<f64>; 2] = [Vec::new(), Vec::new()];
    for (code, value) in codes.into_iter().zip(values) {
        if let (Some(code), Some(value)) = (code, value) {
            if value.is_nan() {
                continue;
            }
            if let Some(slot) = QUALITY_CATEGORIES
                .iter()
                .position(|(c, _)| *c as f64 == code)
            {
                groups[slot].push(value);
            }
        }
    }

    if groups.iter().all(Vec::is_empty) {
        return Err(EdaError::NoValidValues(column.to_string()));
    }
    Ok(groups)
}

// ============================================================================
// Histogram
// ============================================================================

/// One histogram bar.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins plus a count-scaled density curve.
#[derive(Debug, Clone)]
pub struct HistogramModel {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    /// `(x, y)` points of the density overlay, scaled to bar counts
    pub density: Vec<(f64, f64)>,
}

impl HistogramModel {
    /// Bin `values` into `bin_count` equal-width bins over their range.
    ///
    /// The last bin is closed on the right. A constant column gets the unit
    /// range centered on its value.
    pub fn build(column: impl Into<String>, values: &[f64], bin_count: usize) -> Result<Self> {
        let column = column.into();
        if values.is_empty() || bin_count == 0 {
            return Err(EdaError::NoValidValues(column));
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bin_count as f64;

        let mut counts = vec![0usize; bin_count];
        for v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + width * i as f64,
                end: if i + 1 == bin_count {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count,
            })
            .collect();

        let density = match scott_bandwidth(values) {
            Some(bw) => {
                let data_lo = values.iter().copied().fold(f64::INFINITY, f64::min);
                let data_hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let grid = linspace(data_lo, data_hi, HISTOGRAM_KDE_POINTS);
                let scale = values.len() as f64 * width;
                let kde = gaussian_kde(values, bw, &grid);
                grid.into_iter()
                    .zip(kde)
                    .map(|(x, d)| (x, d * scale))
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(Self {
            column,
            bins,
            density,
        })
    }

    pub fn title(&self) -> String {
        format!("Distribution of {}", self.column)
    }

    /// Total number of values binned.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn x_range(&self) -> (f64, f64) {
        let start = self.bins.first().map_or(0.0, |b| b.start);
        let end = self.bins.last().map_or(1.0, |b| b.end);
        (start, end)
    }

    /// Upper y bound with headroom above the tallest bar or curve point.
    pub fn y_max(&self) -> f64 {
        let bars = self.bins.iter().map(|b| b.count as f64).fold(0.0, f64::max);
        let curve = self.density.iter().map(|(_, y)| *y).fold(0.0, f64::max);
        (bars.max(curve) * 1.05).max(1.0)
    }
}

// ============================================================================
// Scatter
// ============================================================================

/// Points of one quality category.
#[derive(Debug, Clone)]
pub struct ScatterGroup {
    pub code: i64,
    pub label: &'static str,
    pub points: Vec<(f64, f64)>,
}

/// Two numeric columns plotted against each other, colored by quality.
#[derive(Debug, Clone)]
pub struct ScatterModel {
    pub x_column: String,
    pub y_column: String,
    /// Always one group per entry of [`QUALITY_CATEGORIES`], in that order
    pub groups: Vec<ScatterGroup>,
}

impl ScatterModel {
    pub fn build(df: &DataFrame, label_column: &str, x_column: &str, y_column: &str) -> Result<Self> {
        let codes = column_values(df, label_column)?;
        let xs = column_values(df, x_column)?;
        let ys = column_values(df, y_column)?;

        let mut groups: Vec<ScatterGroup> = QUALITY_CATEGORIES
            .iter()
            .map(|(code, label)| ScatterGroup {
                code: *code,
                label: *label,
                points: Vec::new(),
            })
            .collect();

        for ((code, x), y) in codes.into_iter().zip(xs).zip(ys) {
            let (Some(code), Some(x), Some(y)) = (code, x, y) else {
                continue;
            };
            if x.is_nan() || y.is_nan() {
                continue;
            }
            if let Some(group) = groups.iter_mut().find(|g| g.code as f64 == code) {
                group.points.push((x, y));
            }
        }

        if groups.iter().all(|g| g.points.is_empty()) {
            return Err(EdaError::NoValidValues(format!("{x_column}/{y_column}")));
        }

        Ok(Self {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            groups,
        })
    }

    pub fn title(&self) -> String {
        format!("Relationship between {} and {}", self.x_column, self.y_column)
    }

    /// Padded `(x, y)` axis ranges covering every point.
    pub fn ranges(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.groups.iter().flat_map(|g| g.points.iter());
        let (mut x_lo, mut x_hi, mut y_lo, mut y_hi) = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for (x, y) in points {
            x_lo = x_lo.min(*x);
            x_hi = x_hi.max(*x);
            y_lo = y_lo.min(*y);
            y_hi = y_hi.max(*y);
        }
        (padded(x_lo, x_hi), padded(y_lo, y_hi))
    }
}

fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad, hi + pad)
}

// ============================================================================
// Heatmap
// ============================================================================

/// Annotated correlation matrix.
#[derive(Debug, Clone)]
pub struct HeatmapModel {
    pub matrix: CorrelationMatrix,
}

impl HeatmapModel {
    /// Correlate every numeric column of `df`.
    ///
    /// Columns the caller dropped beforehand never appear in the labels.
    pub fn build(df: &DataFrame) -> Result<Self> {
        let matrix = correlation(df)?;
        if matrix.is_empty() {
            return Err(EdaError::NoValidValues("numeric columns".to_string()));
        }
        Ok(Self { matrix })
    }

    pub fn title(&self) -> &'static str {
        "Correlation Matrix"
    }

    pub fn labels(&self) -> &[String] {
        &self.matrix.columns
    }

    /// Cell text, two decimals.
    pub fn annotation(&self, row: usize, col: usize) -> String {
        let value = self.matrix.values[row][col];
        if value.is_nan() {
            String::new()
        } else {
            format!("{value:.2}")
        }
    }

    /// Color scale bounds: the smallest and largest finite coefficient.
    pub fn value_range(&self) -> (f64, f64) {
        match self.matrix.finite_range() {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((lo, _)) => (lo - 0.5, lo + 0.5),
            None => (-1.0, 1.0),
        }
    }

    /// Position of `value` on the color scale, in `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        let (lo, hi) = self.value_range();
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

// ============================================================================
// Box plot
// ============================================================================

/// Five-number box with 1.5 IQR whiskers and fliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub code: i64,
    pub label: &'static str,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    fn from_values(code: i64, label: &'static str, values: &[f64]) -> Self {
        let sorted = sorted(values);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let (fence_low, fence_high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted.iter().copied().filter(|v| *v >= fence_low && *v <= fence_high);
        let whisker_low = inside.clone().fold(f64::NAN, f64::min);
        let whisker_high = inside.fold(f64::NAN, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < fence_low || *v > fence_high)
            .collect();

        Self {
            code,
            label,
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        }
    }

    /// Whether the category had any values.
    pub fn is_empty(&self) -> bool {
        self.median.is_nan()
    }
}

/// One box per quality category.
#[derive(Debug, Clone)]
pub struct BoxModel {
    pub column: String,
    pub label_column: String,
    pub boxes: Vec<BoxStats>,
}

impl BoxModel {
    pub fn build(df: &DataFrame, label_column: &str, column: &str) -> Result<Self> {
        let groups = values_by_quality(df, label_column, column)?;
        let boxes = QUALITY_CATEGORIES
            .iter()
            .zip(groups.iter())
            .map(|((code, label), values)| BoxStats::from_values(*code, *label, values))
            .collect();
        Ok(Self {
            column: column.to_string(),
            label_column: label_column.to_string(),
            boxes,
        })
    }

    pub fn title(&self) -> String {
        format!("Box Plot of {} by {}", self.column, self.label_column)
    }

    /// `(code, tick label)` for each x-axis category.
    pub fn categories(&self) -> Vec<(i64, &'static str)> {
        self.boxes.iter().map(|b| (b.code, b.label)).collect()
    }

    pub fn y_range(&self) -> (f64, f64) {
        let values = self.boxes.iter().flat_map(|b| {
            [b.whisker_low, b.whisker_high]
                .into_iter()
                .chain(b.outliers.iter().copied())
        });
        let (lo, hi) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        padded(lo, hi)
    }
}

// ============================================================================
// Violin plot
// ============================================================================

/// One violin: a mirrored density outline plus quartile markers.
#[derive(Debug, Clone)]
pub struct ViolinShape {
    pub code: i64,
    pub label: &'static str,
    /// `(y, half_width)` along the support, ascending in `y`
    pub outline: Vec<(f64, f64)>,
    /// 25th, 50th and 75th percentiles
    pub quartiles: [f64; 3],
    /// Half width of the outline at each quartile
    pub quartile_widths: [f64; 3],
}

/// One violin per quality category, widths normalized to equal area.
#[derive(Debug, Clone)]
pub struct ViolinModel {
    pub column: String,
    pub label_column: String,
    pub violins: Vec<ViolinShape>,
}

impl ViolinModel {
    pub fn build(df: &DataFrame, label_column: &str, column: &str) -> Result<Self> {
        let groups = values_by_quality(df, label_column, column)?;

        // raw densities first, scaled once the global peak is known
        let mut raw: Vec<(Vec<f64>, Vec<f64>, [f64; 3], [f64; 3])> = Vec::new();
        for values in &groups {
            let sorted = sorted(values);
            let quartiles = [0.25, 0.5, 0.75].map(|q| quantile_sorted(&sorted, q));

            match scott_bandwidth(&sorted) {
                Some(bw) => {
                    let lo = sorted[0] - VIOLIN_CUT * bw;
                    let hi = sorted[sorted.len() - 1] + VIOLIN_CUT * bw;
                    let grid = linspace(lo, hi, VIOLIN_GRID_POINTS);
                    let density = gaussian_kde(&sorted, bw, &grid);
                    let at_quartiles = quartiles.map(|q| gaussian_kde(&sorted, bw, &[q])[0]);
                    raw.push((grid, density, quartiles, at_quartiles));
                }
                None => raw.push((Vec::new(), Vec::new(), quartiles, [0.0; 3])),
            }
        }

        let peak = raw
            .iter()
            .flat_map(|(_, density, _, _)| density.iter().copied())
            .fold(0.0, f64::max);
        let scale = if peak > 0.0 {
            CATEGORY_HALF_WIDTH / peak
        } else {
            0.0
        };

        let violins = QUALITY_CATEGORIES
            .iter()
            .zip(raw)
            .map(|((code, label), (grid, density, quartiles, at_quartiles))| ViolinShape {
                code: *code,
                label: *label,
                outline: grid
                    .into_iter()
                    .zip(density)
                    .map(|(y, d)| (y, d * scale))
                    .collect(),
                quartiles,
                quartile_widths: at_quartiles.map(|d| d * scale),
            })
            .collect();

        Ok(Self {
            column: column.to_string(),
            label_column: label_column.to_string(),
            violins,
        })
    }

    pub fn title(&self) -> String {
        format!("Violin Plot of {} by {}", self.column, self.label_column)
    }

    /// `(code, tick label)` for each x-axis category.
    pub fn categories(&self) -> Vec<(i64, &'static str)> {
        self.violins.iter().map(|v| (v.code, v.label)).collect()
    }

    pub fn y_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .violins
            .iter()
            .flat_map(|v| {
                v.outline
                    .iter()
                    .map(|(y, _)| *y)
                    .chain(v.quartiles.iter().copied())
            })
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        padded(lo, hi)
    }
}

/// Tick label for an x position on a quality axis: the category name at
/// integer codes, blank elsewhere.
pub fn category_tick(position: f64) -> String {
    QUALITY_CATEGORIES
        .iter()
        .find(|(code, _)| (position - *code as f64).abs() < 1e-6)
        .map(|(_, label)| label.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encoded_frame() -> DataFrame {
        df![
            "A_id" => [0i64, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            "Juiciness" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 6.5, 7.0, 30.0, 7.5],
            "Weight" => [0.5f64, 1.5, 2.0, 3.5, 4.0, 5.5, 6.5, 6.0, 9.5, 8.0],
            "Quality" => [Some(0i64), Some(0), Some(0), Some(0), Some(1), Some(1), Some(1), Some(1), Some(1), None],
        ]
        .unwrap()
    }

    // ==================== kde tests ====================

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0];
        let bw = scott_bandwidth(&values).unwrap();
        let grid = linspace(-20.0, 30.0, 5001);
        let step = grid[1] - grid[0];
        let area: f64 = gaussian_kde(&values, bw, &grid).iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_bandwidth_degenerate() {
        assert!(scott_bandwidth(&[1.0]).is_none());
        assert!(scott_bandwidth(&[2.0, 2.0, 2.0]).is_none());
    }

    // ==================== histogram tests ====================

    #[test]
    fn test_histogram_bins_cover_range() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        let model = HistogramModel::build("Sweetness", &values, 30).unwrap();

        assert_eq!(model.bins.len(), 30);
        assert_eq!(model.total(), 100);
        assert_eq!(model.x_range(), (0.0, 9.9));
        // the maximum lands in the last, right-closed bin
        assert!(model.bins[29].count >= 1);
        assert_eq!(model.title(), "Distribution of Sweetness");
        assert!(!model.density.is_empty());
        assert!(model.y_max() >= model.bins.iter().map(|b| b.count as f64).fold(0.0, f64::max));
    }

    #[test]
    fn test_histogram_constant_values() {
        let model = HistogramModel::build("Size", &[2.0, 2.0, 2.0], 4).unwrap();
        assert_eq!(model.x_range(), (1.5, 2.5));
        assert_eq!(model.total(), 3);
        assert!(model.density.is_empty());
    }

    #[test]
    fn test_histogram_empty() {
        let err = HistogramModel::build("Size", &[], 30).unwrap_err();
        assert!(matches!(err, EdaError::NoValidValues(_)));
    }

    // ==================== grouping tests ====================

    #[test]
    fn test_values_by_quality_skips_missing_labels() {
        let [bad, good] = values_by_quality(&encoded_frame(), "Quality", "Juiciness").unwrap();
        assert_eq!(bad, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(good, vec![5.0, 6.0, 6.5, 7.0, 30.0]);
    }

    // ==================== scatter tests ====================

    #[test]
    fn test_scatter_groups() {
        let model = ScatterModel::build(&encoded_frame(), "Quality", "Juiciness", "Weight").unwrap();
        let labels: Vec<&str> = model.groups.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["Bad", "Good"]);
        assert_eq!(model.groups[0].points.len(), 4);
        assert_eq!(model.groups[1].points.len(), 5);
        assert_eq!(model.title(), "Relationship between Juiciness and Weight");

        let ((x_lo, x_hi), _) = model.ranges();
        assert!(x_lo < 1.0 && x_hi > 30.0);
    }

    // ==================== heatmap tests ====================

    #[test]
    fn test_heatmap_annotations() {
        let df = encoded_frame().drop("A_id").unwrap();
        let model = HeatmapModel::build(&df).unwrap();

        assert_eq!(model.labels(), &["Juiciness", "Weight", "Quality"]);
        assert_eq!(model.annotation(0, 0), "1.00");
        let annotation = model.annotation(0, 1);
        assert_eq!(annotation.split('.').nth(1).map(str::len), Some(2));
        assert_eq!(model.normalize(model.value_range().1), 1.0);
    }

    // ==================== box tests ====================

    #[test]
    fn test_box_stats() {
        let model = BoxModel::build(&encoded_frame(), "Quality", "Juiciness").unwrap();
        assert_eq!(model.categories(), vec![(0, "Bad"), (1, "Good")]);

        let bad = &model.boxes[0];
        assert_eq!((bad.q1, bad.median, bad.q3), (1.75, 2.5, 3.25));
        assert_eq!((bad.whisker_low, bad.whisker_high), (1.0, 4.0));
        assert!(bad.outliers.is_empty());

        let good = &model.boxes[1];
        assert_eq!(good.median, 6.5);
        assert_eq!(good.outliers, vec![30.0]);
        assert_eq!((good.whisker_low, good.whisker_high), (5.0, 7.0));
        assert_eq!(model.title(), "Box Plot of Juiciness by Quality");
    }

    #[test]
    fn test_box_with_empty_category() {
        let df = df![
            "Quality" => [1i64, 1, 1],
            "Juiciness" => [1.0f64, 2.0, 3.0],
        ]
        .unwrap();
        let model = BoxModel::build(&df, "Quality", "Juiciness").unwrap();
        assert_eq!(model.categories(), vec![(0, "Bad"), (1, "Good")]);
        assert!(model.boxes[0].is_empty());
        assert!(!model.boxes[1].is_empty());
    }

    // ==================== violin tests ====================

    #[test]
    fn test_violin_shapes() {
        let model = ViolinModel::build(&encoded_frame(), "Quality", "Juiciness").unwrap();
        assert_eq!(model.categories(), vec![(0, "Bad"), (1, "Good")]);

        let widest = model
            .violins
            .iter()
            .flat_map(|v| v.outline.iter().map(|(_, w)| *w))
            .fold(0.0, f64::max);
        assert!((widest - CATEGORY_HALF_WIDTH).abs() < 1e-12);

        for violin in &model.violins {
            assert_eq!(violin.outline.len(), VIOLIN_GRID_POINTS);
            assert!(violin.quartiles[0] <= violin.quartiles[1]);
            assert!(violin.quartiles[1] <= violin.quartiles[2]);
            assert!(violin.quartile_widths.iter().all(|w| *w > 0.0));
        }
        assert_eq!(model.violins[0].quartiles, [1.75, 2.5, 3.25]);
    }

    #[test]
    fn test_category_tick() {
        assert_eq!(category_tick(0.0), "Bad");
        assert_eq!(category_tick(1.0), "Good");
        assert_eq!(category_tick(0.5), "");
    }

    #[test]
    fn test_all_labels_missing() {
        let df = df![
            "Quality" => [None::<i64>, None],
            "Juiciness" => [1.0f64, 2.0],
        ]
        .unwrap();
        let err = ViolinModel::build(&df, "Quality", "Juiciness").unwrap_err();
        assert_eq!(err.error_code(), "NO_VALID_VALUES");
    }
}
