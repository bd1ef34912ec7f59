// Improvement classification from paired runtimes
//
// Each pair holds the runtimes of two programs measured at the same input
// size. A verdict is only issued when a large majority of sizes agree.

use crate::improvement::verdict::{ImprovementVerdict, Relation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Maximum symmetric relative error for two runtimes to count as equal
pub const DEFAULT_EQUIVALENCE_TOLERANCE: f64 = 0.15;

/// Minimum fraction of pairs that must agree before a verdict is issued
pub const DEFAULT_CONSENSUS: f64 = 0.95;

/// Decides how two programs compare from their paired runtimes
pub trait ImprovementClassifier: Send + Sync {
    /// `pairs[i] = (runtime of first program, runtime of second program)`
    fn classify(&self, pairs: &[(f64, f64)]) -> Option<ImprovementVerdict>;
}

impl<F> ImprovementClassifier for F
where
    F: Fn(&[(f64, f64)]) -> Option<ImprovementVerdict> + Send + Sync,
{
    fn classify(&self, pairs: &[(f64, f64)]) -> Option<ImprovementVerdict> {
        self(pairs)
    }
}

/// Symmetric relative error `|d1 - d2| / max(|d1|, |d2|)`
///
/// Two zero runtimes have zero error.
pub fn relative_error(d1: f64, d2: f64) -> f64 {
    let scale = d1.abs().max(d2.abs());
    if scale == 0.0 {
        return 0.0;
    }
    (d1 - d2).abs() / scale
}

/// Threshold-based classifier
///
/// 1. `eq` = fraction of pairs with relative error <= `tolerance`
/// 2. `lt` / `gt` = fraction of pairs with `d1 < d2` / `d1 > d2`
/// 3. The first of `eq`, `lt`, `gt` reaching `consensus` decides the
///    verdict (`Equivalent`, `FirstFaster`, `SecondFaster`), otherwise no
///    verdict.
///
/// An empty pair list has no verdict.
///
/// # Example
/// ```
/// use perfverdict::improvement::{ImprovementClassifier, Relation, ThresholdClassifier};
///
/// let classifier = ThresholdClassifier::default();
/// let verdict = classifier
///     .classify(&[(10.0, 10.0), (10.0, 10.15), (10.0, 11.6)])
///     .unwrap();
/// assert_eq!(verdict.relation, Relation::Equivalent);
/// assert_eq!(verdict.confidence, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdClassifier {
    /// Relative error at or below which two runtimes are equivalent
    pub tolerance: f64,

    /// Fraction of agreeing pairs required for a verdict
    pub consensus: f64,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_EQUIVALENCE_TOLERANCE,
            consensus: DEFAULT_CONSENSUS,
        }
    }
}

impl ImprovementClassifier for ThresholdClassifier {
    fn classify(&self, pairs: &[(f64, f64)]) -> Option<ImprovementVerdict> {
        if pairs.is_empty() {
            return None;
        }

        let mut equivalent = 0usize;
        let mut less = 0usize;
        let mut greater = 0usize;

        for &(d1, d2) in pairs {
            if relative_error(d1, d2) <= self.tolerance {
                equivalent += 1;
            }
            if d1 < d2 {
                less += 1;
            } else if d1 > d2 {
                greater += 1;
            }
        }

        let total = pairs.len() as f64;
        let eq_fraction = equivalent as f64 / total;
        let lt_fraction = less as f64 / total;
        let gt_fraction = greater as f64 / total;

        tracing::trace!(
            "Improvement fractions over {} pairs: eq={:.3} lt={:.3} gt={:.3}",
            pairs.len(),
            eq_fraction,
            lt_fraction,
            gt_fraction
        );

        if eq_fraction >= self.consensus {
            Some(ImprovementVerdict::new(Relation::Equivalent, eq_fraction))
        } else if lt_fraction >= self.consensus {
            Some(ImprovementVerdict::new(Relation::FirstFaster, lt_fraction))
        } else if gt_fraction >= self.consensus {
            Some(ImprovementVerdict::new(Relation::SecondFaster, gt_fraction))
        } else {
            None
        }
    }
}

/// Improvement strategy carried by configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Improvement {
    /// Built-in threshold classifier
    Threshold(ThresholdClassifier),

    /// User-supplied classifier (not serializable)
    #[serde(skip)]
    Custom(Arc<dyn ImprovementClassifier>),
}

impl Improvement {
    /// Wrap an arbitrary classification function
    pub fn custom<F>(classifier: F) -> Self
    where
        F: Fn(&[(f64, f64)]) -> Option<ImprovementVerdict> + Send + Sync + 'static,
    {
        Improvement::Custom(Arc::new(classifier))
    }
}

impl Default for Improvement {
    fn default() -> Self {
        Improvement::Threshold(ThresholdClassifier::default())
    }
}

impl ImprovementClassifier for Improvement {
    fn classify(&self, pairs: &[(f64, f64)]) -> Option<ImprovementVerdict> {
        match self {
            Improvement::Threshold(classifier) => classifier.classify(pairs),
            Improvement::Custom(classifier) => classifier.classify(pairs),
        }
    }
}

impl fmt::Debug for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Improvement::Threshold(classifier) => {
                f.debug_tuple("Threshold").field(classifier).finish()
            }
            Improvement::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Default improvement classifier (tolerance 0.15, consensus 0.95)
pub fn default_improvement_classifier() -> ThresholdClassifier {
    ThresholdClassifier::default()
}
