//! Statistics Calculator Module
//! Moments, descriptive summaries, correlation and distribution binning.

use crate::data::{ColumnValues, Dataset};
use polars::prelude::PolarsError;
use rayon::prelude::*;
use statrs::statistics::Statistics;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Column '{0}' is not numeric")]
    NonNumeric(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// The four moments reported for the analysis column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    /// Sample standard deviation (N-1).
    pub std_dev: f64,
    /// Biased Fisher-Pearson skewness.
    pub skewness: f64,
    /// Fisher (excess) kurtosis, population based.
    pub excess_kurtosis: f64,
}

/// Summary used by the describe table.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for DescriptiveStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Five-number summary plus outliers, whiskers at 1.5 IQR.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Equal-width histogram; `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Moments of a named column, missing values dropped first.
    pub fn column_moments(dataset: &Dataset, column: &str) -> Result<Moments, StatsError> {
        match dataset.column_values(column)? {
            ColumnValues::Numeric(values) => Ok(Self::moments(&values)),
            ColumnValues::Text(_) => Err(StatsError::NonNumeric(column.to_string())),
        }
    }

    /// Mean, sample std, skewness and excess kurtosis.
    ///
    /// Skewness and kurtosis use population central moments, so constant
    /// input yields NaN for both.
    pub fn moments(values: &[f64]) -> Moments {
        let n = values.len() as f64;
        let mean = values.iter().mean();
        let std_dev = values.iter().std_dev();

        let central = |k: i32| values.iter().map(|x| (x - mean).powi(k)).sum::<f64>() / n;
        let m2 = central(2);
        let m3 = central(3);
        let m4 = central(4);

        let (skewness, excess_kurtosis) = if m2 > 0.0 {
            (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
        } else {
            (f64::NAN, f64::NAN)
        };

        Moments {
            mean,
            std_dev,
            skewness,
            excess_kurtosis,
        }
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> DescriptiveStats {
        let n = values.len();
        if n == 0 {
            return DescriptiveStats::default();
        }

        let sorted = Self::sorted(values);
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        DescriptiveStats {
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Pearson correlation of two equally long samples.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len().min(y.len());
        if n < 2 {
            return f64::NAN;
        }
        let (x, y) = (&x[..n], &y[..n]);
        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (a, b) in x.iter().zip(y) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        let denom = (var_x * var_y).sqrt();
        if denom == 0.0 {
            f64::NAN
        } else {
            cov / denom
        }
    }

    /// Pairwise Pearson matrix, rows computed in parallel.
    pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
        (0..columns.len())
            .into_par_iter()
            .map(|i| {
                (0..columns.len())
                    .map(|j| Self::pearson(&columns[i], &columns[j]))
                    .collect()
            })
            .collect()
    }

    /// Frequency of each distinct value, most frequent first.
    /// Ties keep first-appearance order.
    pub fn value_counts(values: &[String]) -> Vec<(String, usize)> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for v in values {
            let entry = counts.entry(v.as_str()).or_insert_with(|| {
                order.push(v.as_str());
                0
            });
            *entry += 1;
        }

        let mut result: Vec<(String, usize)> = order
            .into_iter()
            .map(|v| (v.to_string(), counts[v]))
            .collect();
        // stable sort keeps first-appearance order among ties
        result.sort_by(|a, b| b.1.cmp(&a.1));
        result
    }

    /// Equal-width histogram over [min, max]; the last bin is closed.
    ///
    /// A constant sample is spread over [v - 0.5, v + 0.5].
    pub fn histogram(values: &[f64], bins: usize) -> Histogram {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (mut lo, mut hi) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if finite.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    /// Quartiles, whiskers and outliers of a numeric sample.
    pub fn box_stats(values: &[f64]) -> BoxStats {
        let sorted = Self::sorted(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        BoxStats {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        }
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }
}
