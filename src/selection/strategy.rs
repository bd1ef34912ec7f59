// Acceptance and ranking strategies for fitted complexity models
//
// Strategies are single-method traits so that configuration can hold either
// a serializable built-in rule or arbitrary user code. Plain closures
// implement the traits directly.

use crate::fit_stats::{FitStatistics, Stat};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Decides whether a fitted model is acceptable
pub trait ModelAcceptance: Send + Sync {
    fn accept(&self, stats: &FitStatistics) -> bool;
}

impl<F> ModelAcceptance for F
where
    F: Fn(&FitStatistics) -> bool + Send + Sync,
{
    fn accept(&self, stats: &FitStatistics) -> bool {
        self(stats)
    }
}

/// Orders fitted models; `Ordering::Less` ranks `a` ahead of `b`
pub trait ModelRanking: Send + Sync {
    fn compare(&self, a: &FitStatistics, b: &FitStatistics) -> Ordering;
}

impl<F> ModelRanking for F
where
    F: Fn(&FitStatistics, &FitStatistics) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &FitStatistics, b: &FitStatistics) -> Ordering {
        self(a, b)
    }
}

/// Model acceptance rule carried by configuration
///
/// # Example
/// ```
/// use perfverdict::fit_stats::{FitStatistics, Stat};
/// use perfverdict::selection::{Acceptance, ModelAcceptance};
///
/// let rule = Acceptance::AtLeast { stat: Stat::R2, bound: 0.9 };
/// let good = FitStatistics { r2: 0.97, ..Default::default() };
/// let poor = FitStatistics { r2: 0.41, ..Default::default() };
/// assert!(rule.accept(&good));
/// assert!(!rule.accept(&poor));
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case", deny_unknown_fields)]
pub enum Acceptance {
    /// Every fitted model is acceptable
    #[default]
    All,

    /// `stat >= bound`
    AtLeast { stat: Stat, bound: f64 },

    /// `stat <= bound`
    AtMost { stat: Stat, bound: f64 },

    /// Every nested rule must accept
    AllOf { rules: Vec<Acceptance> },

    /// User-supplied predicate (not serializable)
    #[serde(skip)]
    Custom(Arc<dyn ModelAcceptance>),
}

impl Acceptance {
    /// Wrap an arbitrary predicate
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&FitStatistics) -> bool + Send + Sync + 'static,
    {
        Acceptance::Custom(Arc::new(predicate))
    }

    /// Every `(stat, bound)` threshold used by this rule, nested rules included
    pub fn bounds(&self) -> Vec<(Stat, f64)> {
        match self {
            Acceptance::All | Acceptance::Custom(_) => Vec::new(),
            Acceptance::AtLeast { stat, bound } | Acceptance::AtMost { stat, bound } => {
                vec![(*stat, *bound)]
            }
            Acceptance::AllOf { rules } => rules.iter().flat_map(Acceptance::bounds).collect(),
        }
    }
}

impl ModelAcceptance for Acceptance {
    fn accept(&self, stats: &FitStatistics) -> bool {
        match self {
            Acceptance::All => true,
            Acceptance::AtLeast { stat, bound } => stats.get(*stat) >= *bound,
            Acceptance::AtMost { stat, bound } => stats.get(*stat) <= *bound,
            Acceptance::AllOf { rules } => rules.iter().all(|rule| rule.accept(stats)),
            Acceptance::Custom(predicate) => predicate.accept(stats),
        }
    }
}

impl fmt::Debug for Acceptance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acceptance::All => f.write_str("All"),
            Acceptance::AtLeast { stat, bound } => f
                .debug_struct("AtLeast")
                .field("stat", stat)
                .field("bound", bound)
                .finish(),
            Acceptance::AtMost { stat, bound } => f
                .debug_struct("AtMost")
                .field("stat", stat)
                .field("bound", bound)
                .finish(),
            Acceptance::AllOf { rules } => f.debug_struct("AllOf").field("rules", rules).finish(),
            Acceptance::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Model ranking rule carried by configuration
///
/// NaN statistics always rank last, whichever direction is used.
#[derive(Clone, Serialize, Deserialize)]
#[serde(
    tag = "order",
    content = "stat",
    rename_all = "snake_case",
    deny_unknown_fields
)]
pub enum Ranking {
    /// Smallest value first (error measures, information criteria)
    Ascending(Stat),

    /// Largest value first (R² family)
    Descending(Stat),

    /// User-supplied comparator (not serializable)
    #[serde(skip)]
    Custom(Arc<dyn ModelRanking>),
}

impl Ranking {
    /// Wrap an arbitrary comparator
    pub fn custom<F>(comparator: F) -> Self
    where
        F: Fn(&FitStatistics, &FitStatistics) -> Ordering + Send + Sync + 'static,
    {
        Ranking::Custom(Arc::new(comparator))
    }
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking::Ascending(Stat::PredMse)
    }
}

impl ModelRanking for Ranking {
    fn compare(&self, a: &FitStatistics, b: &FitStatistics) -> Ordering {
        match self {
            Ranking::Ascending(stat) => nan_last(a.get(*stat), b.get(*stat), false),
            Ranking::Descending(stat) => nan_last(a.get(*stat), b.get(*stat), true),
            Ranking::Custom(comparator) => comparator.compare(a, b),
        }
    }
}

impl fmt::Debug for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ranking::Ascending(stat) => f.debug_tuple("Ascending").field(stat).finish(),
            Ranking::Descending(stat) => f.debug_tuple("Descending").field(stat).finish(),
            Ranking::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn nan_last(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Default acceptance strategy: accept every fitted model
pub fn default_acceptance() -> Acceptance {
    Acceptance::All
}

/// Default ranking strategy: ascending predicted mean squared error
pub fn default_ranking() -> Ranking {
    Ranking::Ascending(Stat::PredMse)
}
