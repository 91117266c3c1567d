//! Descriptive statistics for weather samples.
//!
//! Summarizes a sample of observations against a threshold: central
//! tendency, dispersion, range, and how often the threshold is crossed.
//!
//! ```
//! use awp_stats::Statistics;
//!
//! let stats = Statistics::calculate(&[1.0, 2.0, 3.0, 4.0], 2.0);
//! assert_eq!(stats.mean, 2.5);
//! assert_eq!(stats.median, 3.0);
//! assert_eq!(stats.probability_above_threshold, 50.0);
//! ```

use serde::Serialize;

/// Summary of a sample relative to a threshold.
///
/// An empty sample yields every field equal to zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Element at index `len / 2` of the sorted sample. For an even length
    /// this is the upper of the two middle elements, not their average.
    pub median: f64,
    /// Population standard deviation (variance divided by `len`).
    pub standard_deviation: f64,
    /// Percentage of samples strictly greater than the threshold.
    pub probability_above_threshold: f64,
    /// `100 - probability_above_threshold`; samples equal to the threshold
    /// count here.
    pub probability_below_threshold: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Statistics {
    /// Summarize `sample` against `threshold`.
    pub fn calculate(sample: &[f64], threshold: f64) -> Self {
        if sample.is_empty() {
            return Statistics::default();
        }
        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sample.len();
        let n = count as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let median = sorted[count / 2];
        let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let above = sample.iter().filter(|&&v| v > threshold).count();
        let probability_above_threshold = above as f64 / n * 100.0;

        Statistics {
            mean,
            median,
            standard_deviation: variance.sqrt(),
            probability_above_threshold,
            probability_below_threshold: 100.0 - probability_above_threshold,
            min: sorted[0],
            max: sorted[count - 1],
            count,
        }
    }
}
