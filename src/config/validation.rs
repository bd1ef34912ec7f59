// Configuration validation errors
//
// Validation never stops at the first problem: every check runs and every
// violation is reported, so a user fixing a suite file sees all mistakes at
// once.

use crate::fit_stats::Stat;
use crate::model::LinearType;
use crate::samples::{distinct_sizes, Sample};
use std::fmt;
use thiserror::Error;

/// Minimum number of distinct input sizes (distinct size pairs for
/// two-argument programs) a test suite must provide
pub const MIN_DISTINCT_INPUTS: usize = 20;

/// Output artifact produced by an external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Graph,
    Report,
    Coordinates,
}

impl Artifact {
    /// File extensions accepted for this artifact (lowercase, no dot)
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Artifact::Graph => &["png", "svg"],
            Artifact::Report => &["txt"],
            Artifact::Coordinates => &["csv"],
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Artifact::Graph => "graph",
            Artifact::Report => "report",
            Artifact::Coordinates => "coordinates",
        };
        f.write_str(name)
    }
}

/// A single violated configuration constraint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("candidate model list must not be empty")]
    EmptyModelList,

    #[error("invalid model {model:?}: {reason}")]
    InvalidModel { model: LinearType, reason: String },

    #[error("model {0:?} listed more than once")]
    DuplicateModel(LinearType),

    #[error("cv_iterations must be >= 1, got {0}")]
    CvIterations(usize),

    #[error("cv_train must be in (0, 1), got {0}")]
    CvTrain(f64),

    #[error("top_models must be in [1, {available}], got {top_models}")]
    TopModels { top_models: usize, available: usize },

    #[error("{artifact} output `{path}` must have extension {}", expected_extensions(.artifact))]
    OutputExtension { artifact: Artifact, path: String },

    #[error("acceptance bound on {stat} must be finite, got {bound}")]
    NonFiniteBound { stat: Stat, bound: f64 },

    #[error("improvement tolerance must be finite and >= 0, got {0}")]
    Tolerance(f64),

    #[error("improvement consensus must be in (0, 1], got {0}")]
    Consensus(f64),

    #[error("program identifiers must not be blank")]
    BlankProgram,

    #[error("program `{0}` listed more than once")]
    DuplicateProgram(String),

    #[error("manual test data name must not be blank")]
    BlankDataName,

    #[error("generated sizes need step > 0, got {0}")]
    GenStep(u64),

    #[error("generated sizes need lower >= 1, got {0}")]
    GenLower(u64),

    #[error("generated sizes need lower <= upper, got {lower} > {upper}")]
    GenBounds { lower: u64, upper: u64 },

    #[error("need at least {required} distinct input sizes, got {actual}")]
    TooFewInputs { required: usize, actual: usize },
}

fn expected_extensions(artifact: &Artifact) -> String {
    artifact
        .extensions()
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Every violation found while validating a configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// `Ok(())` when `errors` is empty
    pub fn check(errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration error(s):", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check that externally supplied test data has enough distinct sizes
///
/// Two-argument samples count distinct size pairs.
pub fn check_distinct_sizes(samples: &[Sample]) -> Option<ValidationError> {
    let actual = distinct_sizes(samples);
    (actual < MIN_DISTINCT_INPUTS).then_some(ValidationError::TooFewInputs {
        required: MIN_DISTINCT_INPUTS,
        actual,
    })
}
