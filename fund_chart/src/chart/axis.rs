//! Value-axis range math for the NAV chart.

/// Fractional padding applied above and below the data range.
pub const DEFAULT_MARGIN_RATIO: f64 = 0.08;

/// Computes the padded `(y_max, y_min)` display range for one series.
///
/// The lower bound is clamped to zero since NAV is never negative, and both
/// bounds are rounded to 4 decimal places. Empty input returns the fixed
/// default `(1.0, 0.0)` so callers never take a min/max of nothing.
pub fn axis_range(values: &[f64], margin_ratio: f64) -> (f64, f64) {
    if values.is_empty() {
        return (1.0, 0.0);
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    let y_max = max * (1.0 + margin_ratio);
    let y_min = (min * (1.0 - margin_ratio)).max(0.0);

    (round4(y_max), round4(y_min))
}

/// Folds per-series ranges into the bounds of the shared value axis: the
/// max of all maxes and the min of all mins, so every series stays visible.
pub fn combined_range(ranges: &[(f64, f64)]) -> Option<(f64, f64)> {
    ranges.iter().copied().reduce(|(max_acc, min_acc), (max, min)| {
        (max_acc.max(max), min_acc.min(min))
    })
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
