// Improvement verdicts comparing the runtimes of two programs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative performance of two programs across shared input sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Runtimes agree within the equivalence tolerance
    Equivalent,
    /// The first program has the smaller runtime
    FirstFaster,
    /// The second program has the smaller runtime
    SecondFaster,
}

impl Relation {
    /// Operator-style symbol used in reports (`≈`, `<`, `>` on runtimes)
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Equivalent => "≈",
            Relation::FirstFaster => "<",
            Relation::SecondFaster => ">",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Relation::Equivalent => "equivalent",
            Relation::FirstFaster => "first faster",
            Relation::SecondFaster => "second faster",
        };
        f.write_str(text)
    }
}

/// A relation plus the fraction of paired samples supporting it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementVerdict {
    pub relation: Relation,

    /// Fraction in (0, 1] of pairs that support `relation`
    pub confidence: f64,
}

impl ImprovementVerdict {
    pub fn new(relation: Relation, confidence: f64) -> Self {
        Self {
            relation,
            confidence,
        }
    }

    /// One-line description naming both programs
    ///
    /// ```
    /// use perfverdict::improvement::{ImprovementVerdict, Relation};
    ///
    /// let verdict = ImprovementVerdict::new(Relation::FirstFaster, 0.96);
    /// assert_eq!(
    ///     verdict.describe("qsort", "isort"),
    ///     "qsort < isort (96.0% of input sizes)"
    /// );
    /// ```
    pub fn describe(&self, first: &str, second: &str) -> String {
        format!(
            "{} {} {} ({:.1}% of input sizes)",
            first,
            self.relation.symbol(),
            second,
            self.confidence * 100.0
        )
    }
}

impl fmt::Display for ImprovementVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}% confidence)", self.relation, self.confidence * 100.0)
    }
}
