// Configuration for statistical analysis of fitted complexity models
//
// Strategies (acceptance, ranking, improvement) are held as serializable
// rules so a configuration can be written to and read from TOML. User code
// plugs in through the Custom variants.

use crate::config::validation::{Artifact, ValidationError};
use crate::fit_stats::Stat;
use crate::improvement::{Improvement, ThresholdClassifier};
use crate::model::{default_models, LinearType};
use crate::selection::{Acceptance, Ranking};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Output destinations for the external renderer
///
/// An omitted path means the artifact is not produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFiles {
    /// Runtime graph (`.png` or `.svg`)
    pub graph: Option<PathBuf>,

    /// Text report (`.txt`)
    pub report: Option<PathBuf>,

    /// Coordinate table of measured and predicted runtimes (`.csv`)
    pub coordinates: Option<PathBuf>,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            graph: Some(PathBuf::from("complexity.png")),
            report: None,
            coordinates: Some(PathBuf::from("complexity.csv")),
        }
    }
}

impl OutputFiles {
    /// Produce no artifacts at all
    pub fn none() -> Self {
        Self {
            graph: None,
            report: None,
            coordinates: None,
        }
    }

    /// Artifacts whose destination is present, in a fixed order
    pub fn requested(&self) -> Vec<(Artifact, &Path)> {
        [
            (Artifact::Graph, &self.graph),
            (Artifact::Report, &self.report),
            (Artifact::Coordinates, &self.coordinates),
        ]
        .into_iter()
        .filter_map(|(artifact, path)| path.as_deref().map(|p| (artifact, p)))
        .collect()
    }

    /// Check every present path has an extension matching its format
    pub fn validate(&self) -> Vec<ValidationError> {
        self.requested()
            .into_iter()
            .filter(|(artifact, path)| !has_extension(path, artifact.extensions()))
            .map(|(artifact, path)| ValidationError::OutputExtension {
                artifact,
                path: path.display().to_string(),
            })
            .collect()
    }
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Tunable parameters for statistical analysis
///
/// # Example
/// ```
/// use perfverdict::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.top_models, 3);
/// assert_eq!(config.cv_train, 0.7);
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Candidate models fitted against the measurements
    pub models: Vec<LinearType>,

    /// Cross-validation iterations run by the fitting engine
    pub cv_iterations: usize,

    /// Fraction of samples used for training in each cross-validation split
    ///
    /// Must lie in the open interval (0, 1).
    pub cv_train: f64,

    /// Number of top-ranked models kept for review
    pub top_models: usize,

    /// Which fitted models are acceptable at all
    pub acceptance: Acceptance,

    /// How acceptable models are ordered
    pub ranking: Ranking,

    /// How two programs' runtimes are compared
    pub improvement: Improvement,

    /// Artifact destinations
    pub outputs: OutputFiles,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            cv_iterations: 200,
            cv_train: 0.7,
            top_models: 3,
            acceptance: Acceptance::All,
            ranking: Ranking::Ascending(Stat::PredMse),
            improvement: Improvement::default(),
            outputs: OutputFiles::default(),
        }
    }
}

impl AnalysisConfig {
    /// Strict configuration: only well-fitting models, ranked by BIC
    ///
    /// Rejects models with R² below 0.9 or a negative predicted R², and
    /// penalises extra coefficients through the information criterion.
    pub fn strict() -> Self {
        Self {
            acceptance: Acceptance::AllOf {
                rules: vec![
                    Acceptance::AtLeast {
                        stat: Stat::R2,
                        bound: 0.9,
                    },
                    Acceptance::AtLeast {
                        stat: Stat::PredR2,
                        bound: 0.0,
                    },
                ],
            },
            ranking: Ranking::Ascending(Stat::Bic),
            top_models: 1,
            ..Self::default()
        }
    }

    /// Permissive configuration: every model is kept and reported
    pub fn permissive() -> Self {
        let models = default_models();
        Self {
            top_models: models.len(),
            models,
            acceptance: Acceptance::All,
            ..Self::default()
        }
    }

    /// Validate configuration, collecting every violation
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.models.is_empty() {
            errors.push(ValidationError::EmptyModelList);
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            if let Err(reason) = model.validate() {
                errors.push(ValidationError::InvalidModel {
                    model: *model,
                    reason,
                });
            }
            if !seen.insert(*model) {
                errors.push(ValidationError::DuplicateModel(*model));
            }
        }

        if self.cv_iterations == 0 {
            errors.push(ValidationError::CvIterations(self.cv_iterations));
        }

        if !(self.cv_train > 0.0 && self.cv_train < 1.0) {
            errors.push(ValidationError::CvTrain(self.cv_train));
        }

        // Upper bound is only meaningful once there are candidates
        let available = self.models.len();
        if self.top_models == 0 || (available > 0 && self.top_models > available) {
            errors.push(ValidationError::TopModels {
                top_models: self.top_models,
                available,
            });
        }

        for (stat, bound) in self.acceptance.bounds() {
            if !bound.is_finite() {
                errors.push(ValidationError::NonFiniteBound { stat, bound });
            }
        }

        if let Improvement::Threshold(classifier) = &self.improvement {
            errors.extend(validate_threshold(classifier));
        }

        errors.extend(self.outputs.validate());

        errors
    }
}

fn validate_threshold(classifier: &ThresholdClassifier) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !(classifier.tolerance.is_finite() && classifier.tolerance >= 0.0) {
        errors.push(ValidationError::Tolerance(classifier.tolerance));
    }
    if !(classifier.consensus > 0.0 && classifier.consensus <= 1.0) {
        errors.push(ValidationError::Consensus(classifier.consensus));
    }

    errors
}

/// Fully populated default analysis configuration
pub fn default_analysis_config() -> AnalysisConfig {
    AnalysisConfig::default()
}

/// A single output destination in a configuration file
///
/// `graph = "out.svg"` sets a path, `graph = false` disables the artifact,
/// `graph = true` keeps the default destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputSetting {
    Enabled(bool),
    Path(PathBuf),
}

impl OutputSetting {
    fn apply(self, default: Option<PathBuf>) -> Option<PathBuf> {
        match self {
            OutputSetting::Enabled(true) => default,
            OutputSetting::Enabled(false) => None,
            OutputSetting::Path(path) => Some(path),
        }
    }
}

/// Output overrides read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputOptions {
    pub graph: Option<OutputSetting>,
    pub report: Option<OutputSetting>,
    pub coordinates: Option<OutputSetting>,
}

/// User overrides applied on top of [`AnalysisConfig::default`]
///
/// Every field is optional; absent fields keep their default value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisOptions {
    pub models: Option<Vec<LinearType>>,
    pub cv_iterations: Option<usize>,
    pub cv_train: Option<f64>,
    pub top_models: Option<usize>,
    pub acceptance: Option<Acceptance>,
    pub ranking: Option<Ranking>,
    pub improvement: Option<Improvement>,
    pub outputs: Option<OutputOptions>,
}

impl AnalysisOptions {
    /// Overlay these options onto `base`
    pub fn apply(self, base: AnalysisConfig) -> AnalysisConfig {
        let outputs = match self.outputs {
            Some(opts) => OutputFiles {
                graph: overlay(opts.graph, base.outputs.graph),
                report: overlay(opts.report, base.outputs.report),
                coordinates: overlay(opts.coordinates, base.outputs.coordinates),
            },
            None => base.outputs,
        };

        AnalysisConfig {
            models: self.models.unwrap_or(base.models),
            cv_iterations: self.cv_iterations.unwrap_or(base.cv_iterations),
            cv_train: self.cv_train.unwrap_or(base.cv_train),
            top_models: self.top_models.unwrap_or(base.top_models),
            acceptance: self.acceptance.unwrap_or(base.acceptance),
            ranking: self.ranking.unwrap_or(base.ranking),
            improvement: self.improvement.unwrap_or(base.improvement),
            outputs,
        }
    }
}

fn overlay(setting: Option<OutputSetting>, default: Option<PathBuf>) -> Option<PathBuf> {
    match setting {
        Some(setting) => setting.apply(default),
        None => default,
    }
}
