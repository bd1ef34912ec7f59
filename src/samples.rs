//! Timing samples produced by the measurement harness
//!
//! The harness itself is external; this module only aligns and cleans the
//! samples it hands over before they reach the improvement classifier.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Input size of one measurement: one size per program argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSize {
    Unary(u64),
    Binary(u64, u64),
}

impl fmt::Display for InputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSize::Unary(n) => write!(f, "{}", n),
            InputSize::Binary(a, b) => write!(f, "({}, {})", a, b),
        }
    }
}

/// One runtime measurement
///
/// JSON form: `{"size": 100, "runtime": 0.25}` or
/// `{"size": [100, 20], "runtime": 0.25}` for two-argument programs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub size: InputSize,
    /// Runtime in seconds
    pub runtime: f64,
}

impl Sample {
    pub fn unary(size: u64, runtime: f64) -> Self {
        Self {
            size: InputSize::Unary(size),
            runtime,
        }
    }

    pub fn binary(size_a: u64, size_b: u64, runtime: f64) -> Self {
        Self {
            size: InputSize::Binary(size_a, size_b),
            runtime,
        }
    }
}

// Later samples for the same size replace earlier ones
fn by_size(samples: &[Sample]) -> BTreeMap<InputSize, f64> {
    samples.iter().map(|s| (s.size, s.runtime)).collect()
}

/// Pair the runtimes of two programs over the input sizes both were run on
///
/// Sizes measured for only one program are dropped. Pairs are ordered by
/// input size.
///
/// # Example
/// ```
/// use perfverdict::samples::{paired_runtimes, Sample};
///
/// let first = vec![Sample::unary(10, 1.0), Sample::unary(20, 2.0)];
/// let second = vec![Sample::unary(20, 2.5), Sample::unary(30, 3.0)];
/// assert_eq!(paired_runtimes(&first, &second), vec![(2.0, 2.5)]);
/// ```
pub fn paired_runtimes(first: &[Sample], second: &[Sample]) -> Vec<(f64, f64)> {
    let first = by_size(first);
    let second = by_size(second);

    let pairs: Vec<(f64, f64)> = first
        .iter()
        .filter_map(|(size, d1)| second.get(size).map(|d2| (*d1, *d2)))
        .collect();

    let unmatched = first.len() + second.len() - 2 * pairs.len();
    if unmatched > 0 {
        tracing::debug!(
            "Pairing runtimes: {} shared sizes, {} sizes measured for one program only",
            pairs.len(),
            unmatched
        );
    }

    pairs
}

/// Subtract the baseline runtime measured at the same input size
///
/// Results are clamped at zero. Samples without a baseline measurement are
/// kept unchanged.
pub fn subtract_baseline(samples: &[Sample], baseline: &[Sample]) -> Vec<Sample> {
    let baseline = by_size(baseline);

    samples
        .iter()
        .map(|sample| {
            let Some(base) = baseline.get(&sample.size) else {
                tracing::warn!("No baseline measurement for input size {}", sample.size);
                return *sample;
            };

            let adjusted = sample.runtime - base;
            if adjusted < 0.0 {
                tracing::warn!(
                    "Baseline ({:.3e}s) exceeds runtime ({:.3e}s) at input size {}, clamping to 0",
                    base,
                    sample.runtime,
                    sample.size
                );
            }

            Sample {
                size: sample.size,
                runtime: adjusted.max(0.0),
            }
        })
        .collect()
}

/// Number of distinct input sizes (distinct size pairs for binary data)
pub fn distinct_sizes(samples: &[Sample]) -> usize {
    samples
        .iter()
        .map(|s| s.size)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_runtimes_orders_by_size() {
        let first = vec![
            Sample::unary(30, 3.0),
            Sample::unary(10, 1.0),
            Sample::unary(20, 2.0),
        ];
        let second = vec![
            Sample::unary(10, 1.5),
            Sample::unary(30, 3.5),
            Sample::unary(20, 2.5),
        ];

        assert_eq!(
            paired_runtimes(&first, &second),
            vec![(1.0, 1.5), (2.0, 2.5), (3.0, 3.5)]
        );
    }

    #[test]
    fn test_paired_runtimes_no_overlap() {
        let first = vec![Sample::unary(1, 1.0)];
        let second = vec![Sample::unary(2, 1.0)];
        assert!(paired_runtimes(&first, &second).is_empty());
    }

    #[test]
    fn test_paired_runtimes_binary_sizes() {
        let first = vec![Sample::binary(1, 2, 1.0), Sample::binary(2, 1, 5.0)];
        let second = vec![Sample::binary(2, 1, 6.0)];
        assert_eq!(paired_runtimes(&first, &second), vec![(5.0, 6.0)]);
    }

    #[test]
    fn test_duplicate_sizes_last_wins() {
        let first = vec![Sample::unary(5, 1.0), Sample::unary(5, 9.0)];
        let second = vec![Sample::unary(5, 2.0)];
        assert_eq!(paired_runtimes(&first, &second), vec![(9.0, 2.0)]);
    }

    #[test]
    fn test_subtract_baseline_clamps() {
        let samples = vec![Sample::unary(1, 5.0), Sample::unary(2, 1.0), Sample::unary(3, 4.0)];
        let baseline = vec![Sample::unary(1, 2.0), Sample::unary(2, 3.0)];

        let adjusted = subtract_baseline(&samples, &baseline);
        assert_eq!(
            adjusted,
            vec![Sample::unary(1, 3.0), Sample::unary(2, 0.0), Sample::unary(3, 4.0)]
        );
    }

    #[test]
    fn test_distinct_sizes() {
        let samples = vec![
            Sample::binary(1, 2, 1.0),
            Sample::binary(1, 2, 1.1),
            Sample::binary(2, 1, 1.0),
        ];
        assert_eq!(distinct_sizes(&samples), 2);
        assert_eq!(distinct_sizes(&[]), 0);
    }

    #[test]
    fn test_sample_json_forms() {
        let unary: Sample = serde_json::from_str(r#"{"size": 100, "runtime": 0.25}"#).unwrap();
        assert_eq!(unary, Sample::unary(100, 0.25));

        let binary: Sample = serde_json::from_str(r#"{"size": [4, 8], "runtime": 1.5}"#).unwrap();
        assert_eq!(binary, Sample::binary(4, 8, 1.5));
    }

    #[test]
    fn test_input_size_display() {
        assert_eq!(InputSize::Unary(7).to_string(), "7");
        assert_eq!(InputSize::Binary(7, 9).to_string(), "(7, 9)");
    }
}
