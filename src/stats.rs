//! Descriptive statistics over slices of present (non-missing) values.
//!
//! Conventions follow the usual dataframe defaults: sample standard deviation
//! (n - 1), linear-interpolation quantiles, adjusted Fisher-Pearson skewness
//! and bias-corrected excess kurtosis. Anything undefined for the input size
//! comes back as `NaN` rather than an error.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distribution {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Distribution {
    pub fn describe(values: &[f64]) -> Self {
        let sorted = sorted(values);
        Self {
            count: values.len(),
            mean: mean(values),
            std: std_dev(values),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    let count = values.len();
    if count < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let sum_squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (sum_squares / (count as f64 - 1.0)).max(0.0).sqrt()
}

/// Quantile of an already sorted slice with linear interpolation between
/// the two closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let (low, high) = (sorted[lower], sorted[upper]);
    low + (high - low) * (position - lower as f64)
}

/// Adjusted Fisher-Pearson skewness; `0.0` for a constant sample.
pub fn skewness(values: &[f64]) -> f64 {
    let count = values.len();
    if count < 3 {
        return f64::NAN;
    }
    if is_constant(values) {
        return 0.0;
    }
    let n = count as f64;
    let mean = mean(values);
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
    if m2 == 0.0 {
        // deviations underflowed
        return f64::NAN;
    }
    ((n * (n - 1.0)).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
}

/// Bias-corrected excess kurtosis; `0.0` for a constant sample.
pub fn kurtosis(values: &[f64]) -> f64 {
    let count = values.len();
    if count < 4 {
        return f64::NAN;
    }
    if is_constant(values) {
        return 0.0;
    }
    let n = count as f64;
    let mean = mean(values);
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>();
    let denominator = (n - 2.0) * (n - 3.0) * m2 * m2;
    if denominator == 0.0 {
        return f64::NAN;
    }
    let numerator = n * (n + 1.0) * (n - 1.0) * m4;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    numerator / denominator - adjustment
}

/// Pearson correlation over paired samples of equal length.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 || is_constant(xs) || is_constant(ys) {
        return f64::NAN;
    }
    let (mean_x, mean_y) = (mean(xs), mean(ys));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (low, high) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let idx = (((value - low) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            lower: low + width * idx as f64,
            upper: if idx + 1 == bins {
                high
            } else {
                low + width * (idx + 1) as f64
            },
            count,
        })
        .collect()
}
