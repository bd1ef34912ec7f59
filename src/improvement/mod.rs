// Runtime improvement classification
//
// Compares two programs from runtimes measured at the same input sizes and
// decides whether they are equivalent or which one is faster. A missing
// verdict is a valid outcome: relative performance was not consistent
// enough across sizes to draw a conclusion.
//
// The threshold classifier is the default strategy. Any type implementing
// ImprovementClassifier (including a plain closure) can replace it.

mod classifier;
mod verdict;

pub use classifier::{
    default_improvement_classifier, relative_error, Improvement, ImprovementClassifier,
    ThresholdClassifier, DEFAULT_CONSENSUS, DEFAULT_EQUIVALENCE_TOLERANCE,
};
pub use verdict::{ImprovementVerdict, Relation};
