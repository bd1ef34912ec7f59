// Test-suite configuration
//
// A test suite is read from a TOML file as a record of optional fields and
// only becomes a TestSuiteConfig once every field is present and valid.
// Partially specified suites are rejected, never defaulted.
//
// # Example suite.toml
//
// ```toml
// programs = ["quicksort", "mergesort"]
// data = { gen = { lower = 100, step = 100, upper = 5000 } }
// baseline = false
// full_evaluation = true
// compiler_flags = ["-O2"]
//
// [harness]
// warmup = 3
//
// [analysis]
// top_models = 2
// acceptance = { rule = "at_least", stat = "r2", bound = 0.8 }
// ```

use crate::config::analysis::{AnalysisConfig, AnalysisOptions};
use crate::config::validation::{ValidationError, ValidationErrors, MIN_DISTINCT_INPUTS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Where a test suite's input data comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Externally supplied test data, referenced by name
    Manual(String),

    /// Generated inputs whose sizes form `lower, lower + step, ..., <= upper`
    ///
    /// Two-argument programs pair the progression with itself, so they get
    /// as many distinct size pairs as there are sizes.
    Gen { lower: u64, step: u64, upper: u64 },
}

impl DataSource {
    /// Number of distinct sizes a generated source yields
    ///
    /// `None` for manual data or a malformed progression. Saturates at
    /// `usize::MAX`.
    pub fn generated_sizes(&self) -> Option<usize> {
        match *self {
            DataSource::Gen { lower, step, upper } if step > 0 && lower <= upper => {
                let steps = usize::try_from((upper - lower) / step).unwrap_or(usize::MAX);
                Some(steps.saturating_add(1))
            }
            _ => None,
        }
    }

    /// Validate the data source, collecting every violation
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match *self {
            DataSource::Manual(ref name) => {
                if name.trim().is_empty() {
                    errors.push(ValidationError::BlankDataName);
                }
            }
            DataSource::Gen { lower, step, upper } => {
                if step == 0 {
                    errors.push(ValidationError::GenStep(step));
                }
                if lower == 0 {
                    errors.push(ValidationError::GenLower(lower));
                }
                if lower > upper {
                    errors.push(ValidationError::GenBounds { lower, upper });
                }
                if let Some(actual) = self.generated_sizes() {
                    if actual < MIN_DISTINCT_INPUTS {
                        errors.push(ValidationError::TooFewInputs {
                            required: MIN_DISTINCT_INPUTS,
                            actual,
                        });
                    }
                }
            }
        }

        errors
    }
}

/// A fully specified, validated test suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteConfig {
    /// Programs to test; empty means every program in scope
    pub programs: Vec<String>,

    /// Input data policy
    pub data: DataSource,

    /// Statistical analysis parameters
    pub analysis: AnalysisConfig,

    /// Measurement harness settings, passed through untouched
    pub harness: toml::Table,

    /// Subtract baseline measurements from runtimes
    pub baseline: bool,

    /// Fully evaluate program results when timing
    pub full_evaluation: bool,

    /// Extra compiler flags for building the programs under test
    pub compiler_flags: Vec<String>,
}

impl TestSuiteConfig {
    /// Load, build and validate a suite file
    ///
    /// Fails with every validation error when the suite is incomplete or
    /// invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let options = TestSuiteOptions::from_file(path)?;
        options
            .build()
            .with_context(|| format!("Invalid test suite {}", path.display()))
    }

    /// Validate configuration, collecting every violation
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = validate_programs(&self.programs);
        errors.extend(self.data.validate());
        errors.extend(self.analysis.validate());
        errors
    }
}

fn validate_programs(programs: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for program in programs {
        if program.trim().is_empty() {
            errors.push(ValidationError::BlankProgram);
        } else if !seen.insert(program.as_str()) {
            errors.push(ValidationError::DuplicateProgram(program.clone()));
        }
    }

    errors
}

/// Test-suite record as written in a configuration file
///
/// Every field is required; [`build`](Self::build) reports the missing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSuiteOptions {
    pub programs: Option<Vec<String>>,
    pub data: Option<DataSource>,
    pub analysis: Option<AnalysisOptions>,
    pub harness: Option<toml::Table>,
    pub baseline: Option<bool>,
    pub full_evaluation: Option<bool>,
    pub compiler_flags: Option<Vec<String>>,
}

impl TestSuiteOptions {
    /// Load a suite record from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load a suite record from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Turn the record into a validated suite
    ///
    /// Missing fields and invalid values are all reported together.
    pub fn build(self) -> std::result::Result<TestSuiteConfig, ValidationErrors> {
        let mut errors: Vec<ValidationError> = self
            .missing_fields()
            .into_iter()
            .map(ValidationError::MissingField)
            .collect();

        if let Some(programs) = &self.programs {
            errors.extend(validate_programs(programs));
        }
        if let Some(data) = &self.data {
            errors.extend(data.validate());
        }
        let analysis = self
            .analysis
            .map(|opts| opts.apply(AnalysisConfig::default()));
        if let Some(analysis) = &analysis {
            errors.extend(analysis.validate());
        }

        match (
            self.programs,
            self.data,
            analysis,
            self.harness,
            self.baseline,
            self.full_evaluation,
            self.compiler_flags,
        ) {
            (
                Some(programs),
                Some(data),
                Some(analysis),
                Some(harness),
                Some(baseline),
                Some(full_evaluation),
                Some(compiler_flags),
            ) if errors.is_empty() => Ok(TestSuiteConfig {
                programs,
                data,
                analysis,
                harness,
                baseline,
                full_evaluation,
                compiler_flags,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("programs", self.programs.is_none()),
            ("data", self.data.is_none()),
            ("analysis", self.analysis.is_none()),
            ("harness", self.harness.is_none()),
            ("baseline", self.baseline.is_none()),
            ("full_evaluation", self.full_evaluation.is_none()),
            ("compiler_flags", self.compiler_flags.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }
}
