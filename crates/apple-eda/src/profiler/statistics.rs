//! Statistical functions over plain `f64` slices.
//!
//! Conventions follow the usual dataframe library defaults: sample standard
//! deviation (ddof = 1), linearly interpolated quantiles, bias-corrected
//! skewness and excess kurtosis.

use crate::types::BoxSummary;
use std::cmp::Ordering;

/// One histogram bin, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Sort a copy of the values ascending.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation; `NaN` below two values.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

/// Quantile of an ascending slice by linear interpolation between closest ranks.
pub(crate) fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] + (values[upper] - values[lower]) * weight
}

/// Smallest of the most frequent values.
pub(crate) fn mode(values: &[f64]) -> Option<f64> {
    let sorted = sorted(values);
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let mut j = i;
        while j < sorted.len() && sorted[j] == value {
            j += 1;
        }
        let run = j - i;
        // strict comparison keeps the smaller value on ties
        if best.is_none_or(|(_, count)| run > count) {
            best = Some((value, run));
        }
        i = j.max(i + 1);
    }
    best.map(|(value, _)| value)
}

/// Central moments m2, m3, m4 (divided by n).
fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let mean = mean(values);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Adjusted Fisher-Pearson skewness; `NaN` below three values.
pub(crate) fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    if is_constant(values) {
        return 0.0;
    }
    let (m2, m3, _) = central_moments(values);
    let g1 = m3 / m2.powf(1.5);
    let n = n as f64;
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Bias-corrected excess kurtosis; `NaN` below four values.
pub(crate) fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }
    if is_constant(values) {
        return 0.0;
    }
    let (m2, _, m4) = central_moments(values);
    let g2 = m4 / (m2 * m2) - 3.0;
    let n = n as f64;
    ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// Pearson correlation of two equally long samples.
///
/// `NaN` when either side has zero variance or fewer than two points.
pub(crate) fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let (mx, my) = (mean(x), mean(y));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Tukey fences `(Q1 - 1.5 IQR, Q3 + 1.5 IQR)` of an ascending slice.
pub(crate) fn iqr_bounds(sorted: &[f64]) -> (f64, f64) {
    let q1 = quantile_sorted(sorted, 0.25);
    let q3 = quantile_sorted(sorted, 0.75);
    let iqr = q3 - q1;
    (q1 - 1.5 * iqr, q3 + 1.5 * iqr)
}

/// Equal-width histogram over the value range.
///
/// A constant sample gets the range `[v - 0.5, v + 0.5]`.
pub(crate) fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + idx as f64 * width,
            end: min + (idx as f64 + 1.0) * width,
            count,
        })
        .collect()
}

/// Box-and-whisker figures with whiskers at the furthest values inside the fences.
pub(crate) fn box_summary(label: &str, values: &[f64]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let (lower_fence, upper_fence) = iqr_bounds(&sorted);
    let inside = || sorted.iter().copied().filter(|v| *v >= lower_fence && *v <= upper_fence);

    Some(BoxSummary {
        label: label.to_string(),
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
        lower_whisker: inside().next().unwrap_or(sorted[0]),
        upper_whisker: inside().last().unwrap_or(sorted[sorted.len() - 1]),
        fliers: sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_fence || *v > upper_fence)
            .collect(),
    })
}
