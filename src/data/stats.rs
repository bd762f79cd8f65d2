use std::collections::BTreeSet;

use super::model::MarketDataset;

// ---------------------------------------------------------------------------
// Scalar statistics
// ---------------------------------------------------------------------------

/// Pearson correlation coefficient between two equal-length series.
///
/// Returns `None` when there are fewer than two points or either series has
/// zero variance. The result is clamped to `[-1, 1]` to absorb rounding.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Ordinary least squares fit `y = slope * x + intercept` for the scatter
/// trendline. `None` when the x series is degenerate.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
    }
    if var_x == 0.0 {
        return None;
    }
    let slope = cov / var_x;
    Some((slope, mean_y - slope * mean_x))
}

// ---------------------------------------------------------------------------
// Box-plot statistics (grouped distribution)
// ---------------------------------------------------------------------------

/// Five-number summary with whiskers clamped to the most extreme data points
/// within `k` IQRs of the quartiles; points beyond are outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Quantile with linear interpolation over sorted data, `q` in `[0, 1]`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Box-plot statistics over `values` with the `k`-IQR outlier rule
/// (the charting convention is `k = 1.5`). `None` for an empty slice.
pub fn box_stats(values: &[f64], k: f64) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - k * iqr;
    let high_fence = q3 + k * iqr;

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);
    let outliers: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

// ---------------------------------------------------------------------------
// Pivoted mean table (heatmap source)
// ---------------------------------------------------------------------------

/// Mean price by (year, month), laid out as one row per year and twelve
/// month columns. Cells with no observations stay `None` and render as gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPivot {
    /// Ascending years, one per row of `cells`.
    pub years: Vec<i32>,
    /// `cells[row][month - 1]` = mean price, or `None` for a gap.
    pub cells: Vec<Vec<Option<f64>>>,
    /// Smallest cell mean, for color scaling.
    pub min: f64,
    /// Largest cell mean, for color scaling.
    pub max: f64,
}

/// Pivot mean price by (year, month) over the year-filtered dataset. The
/// heatmap deliberately ignores the date and phase filters so a full season
/// is always visible for every selected year.
pub fn monthly_pivot(dataset: &MarketDataset, years: &BTreeSet<i32>) -> Option<MonthlyPivot> {
    let rows: Vec<i32> = years.iter().copied().collect();
    if rows.is_empty() {
        return None;
    }

    let mut sums = vec![[0.0f64; 12]; rows.len()];
    let mut counts = vec![[0u32; 12]; rows.len()];
    for r in &dataset.records {
        let Ok(row) = rows.binary_search(&r.year) else {
            continue;
        };
        let m = (r.month - 1) as usize;
        sums[row][m] += r.price_brl;
        counts[row][m] += 1;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let cells: Vec<Vec<Option<f64>>> = sums
        .iter()
        .zip(&counts)
        .map(|(row_sums, row_counts)| {
            (0..12)
                .map(|m| {
                    if row_counts[m] == 0 {
                        return None;
                    }
                    let mean = row_sums[m] / row_counts[m] as f64;
                    min = min.min(mean);
                    max = max.max(mean);
                    Some(mean)
                })
                .collect()
        })
        .collect();

    if !min.is_finite() {
        // Selected years have no records at all.
        return None;
    }
    Some(MonthlyPivot {
        years: rows,
        cells,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MarketRecord;

    #[test]
    fn pearson_of_affine_relationship_is_one() {
        let xs = [150.0, 152.0, 148.0, 155.0, 151.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.02 * x + 2.0).collect();
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-9, "r = {r}");
    }

    #[test]
    fn pearson_of_negative_slope_is_minus_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| -3.0 * x + 10.0).collect();
        assert!((pearson(&xs, &ys).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_degenerate_cases() {
        assert!(pearson(&[1.0], &[2.0]).is_none());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn linear_fit_recovers_line() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.5 * x - 1.0).collect();
        let (slope, intercept) = linear_fit(&xs, &ys).unwrap();
        assert!((slope - 2.5).abs() < 1e-9);
        assert!((intercept + 1.0).abs() < 1e-9);
    }

    #[test]
    fn box_stats_quartiles() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let bs = box_stats(&values, 1.5).unwrap();
        assert_eq!(bs.median, 3.0);
        assert_eq!(bs.q1, 2.0);
        assert_eq!(bs.q3, 4.0);
        assert_eq!(bs.lower_whisker, 1.0);
        assert_eq!(bs.upper_whisker, 5.0);
        assert!(bs.outliers.is_empty());
    }

    #[test]
    fn box_stats_flags_outliers() {
        let values = [8.0, 9.0, 10.0, 10.0, 10.0, 11.0, 12.0, 12.0, 100.0];
        let bs = box_stats(&values, 1.5).unwrap();
        // q1 = 10, q3 = 12, fences at [7, 15]
        assert_eq!(bs.outliers, vec![100.0]);
        assert_eq!(bs.lower_whisker, 8.0);
        assert_eq!(bs.upper_whisker, 12.0);
    }

    #[test]
    fn box_stats_single_value() {
        let bs = box_stats(&[7.0], 1.5).unwrap();
        assert_eq!(bs.median, 7.0);
        assert_eq!(bs.lower_whisker, 7.0);
        assert_eq!(bs.upper_whisker, 7.0);
    }

    fn ds(rows: &[(&str, f64)]) -> MarketDataset {
        MarketDataset::from_records(
            rows.iter()
                .map(|(d, p)| {
                    MarketRecord::new(d.parse().unwrap(), *p, 5.0, "x".to_string(), 0.0, 0.0)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn pivot_means_and_gaps() {
        let data = ds(&[
            ("2023-01-10", 100.0),
            ("2023-01-20", 110.0),
            ("2023-03-01", 130.0),
            ("2024-01-05", 140.0),
        ]);
        let years: BTreeSet<i32> = [2023, 2024].into();
        let pivot = monthly_pivot(&data, &years).unwrap();

        assert_eq!(pivot.years, vec![2023, 2024]);
        assert_eq!(pivot.cells[0][0], Some(105.0)); // Jan 2023
        assert_eq!(pivot.cells[0][1], None); // Feb 2023: gap
        assert_eq!(pivot.cells[0][2], Some(130.0));
        assert_eq!(pivot.cells[1][0], Some(140.0));
        assert_eq!(pivot.min, 105.0);
        assert_eq!(pivot.max, 140.0);
    }

    #[test]
    fn pivot_ignores_unselected_years() {
        let data = ds(&[("2023-01-10", 100.0), ("2024-01-05", 140.0)]);
        let years: BTreeSet<i32> = [2024].into();
        let pivot = monthly_pivot(&data, &years).unwrap();
        assert_eq!(pivot.years, vec![2024]);
        assert_eq!(pivot.min, 140.0);
    }

    #[test]
    fn pivot_empty_selection() {
        let data = ds(&[("2023-01-10", 100.0)]);
        assert!(monthly_pivot(&data, &BTreeSet::new()).is_none());
        let years: BTreeSet<i32> = [1999].into();
        assert!(monthly_pivot(&data, &years).is_none());
    }
}
