//! End-to-end analysis of fitted models and paired runtimes
//!
//! Pure functions over immutable inputs: fitted statistics and timing
//! samples in, ranked models and improvement verdicts out. Rendering the
//! results to files is left to an external renderer; this module only
//! produces the data and a plain-text report.

use crate::config::AnalysisConfig;
use crate::fit_stats::FitStatistics;
use crate::improvement::{ImprovementClassifier, ImprovementVerdict};
use crate::model::LinearType;
use crate::samples::{paired_runtimes, Sample};
use crate::selection::select;
use serde::{Deserialize, Serialize};

/// One fitted candidate as handed over by the regression engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub model: LinearType,
    pub stats: FitStatistics,
}

impl From<FittedModel> for (LinearType, FitStatistics) {
    fn from(fit: FittedModel) -> Self {
        (fit.model, fit.stats)
    }
}

/// A model that survived selection, with its position in the ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedModel {
    /// 1-based rank
    pub rank: usize,
    pub model: LinearType,
    pub name: String,
    pub equation: String,
    pub stats: FitStatistics,
}

/// Outcome of ranking every candidate model fitted to one program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityAnalysis {
    /// Number of fitted candidates before selection
    pub candidates: usize,

    /// Acceptable models, best first, at most `top_models` long
    pub ranked: Vec<RankedModel>,
}

impl ComplexityAnalysis {
    /// The approximated complexity: the best-ranked acceptable model
    pub fn best(&self) -> Option<&RankedModel> {
        self.ranked.first()
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        match self.best() {
            Some(best) => {
                report.push_str(&format!("✅ APPROXIMATED COMPLEXITY: {}\n", best.name));
                report.push_str(&format!("   {}\n", best.equation));
            }
            None => {
                report.push_str("⚠️  NO ACCEPTABLE MODEL\n\n");
                report.push_str(&format!(
                    "None of the {} fitted candidate models passed the acceptance rule\n",
                    self.candidates
                ));
                return report;
            }
        }

        report.push_str(&format!(
            "\n📊 Ranked models ({} of {} candidates):\n",
            self.ranked.len(),
            self.candidates
        ));
        for entry in &self.ranked {
            report.push_str(&format!(
                "  {}. {} (PMSE={:.4}, R²={:.4}, Adj. R²={:.4}, BIC={:.2})\n",
                entry.rank,
                entry.name,
                entry.stats.pred_mse,
                entry.stats.r2,
                entry.stats.adj_r2,
                entry.stats.bic
            ));
        }

        report
    }
}

/// Select and rank fitted candidate models using `config`'s rules
///
/// Fits for models outside `config.models` are ignored.
///
/// # Example
/// ```
/// use perfverdict::analysis::analyse;
/// use perfverdict::config::AnalysisConfig;
/// use perfverdict::fit_stats::FitStatistics;
/// use perfverdict::model::LinearType;
///
/// let fit = |pred_mse| FitStatistics { pred_mse, ..Default::default() };
/// let fits = vec![(LinearType::Poly(1), fit(0.2)), (LinearType::Poly(2), fit(0.9))];
///
/// let analysis = analyse(fits, &AnalysisConfig::default());
/// assert_eq!(analysis.best().unwrap().name, "linear");
/// ```
pub fn analyse(
    fits: Vec<(LinearType, FitStatistics)>,
    config: &AnalysisConfig,
) -> ComplexityAnalysis {
    let (fits, unconfigured): (Vec<_>, Vec<_>) = fits
        .into_iter()
        .partition(|(model, _)| config.models.contains(model));
    if !unconfigured.is_empty() {
        tracing::debug!(
            "Ignoring {} fits for models not in the candidate list: {:?}",
            unconfigured.len(),
            unconfigured.iter().map(|(model, _)| *model).collect::<Vec<_>>()
        );
    }

    let candidates = fits.len();

    let ranked: Vec<RankedModel> = select(fits, &config.acceptance, &config.ranking, config.top_models)
        .into_iter()
        .enumerate()
        .map(|(i, (model, stats))| RankedModel {
            rank: i + 1,
            model,
            name: model.name(),
            equation: model.equation(),
            stats,
        })
        .collect();

    match ranked.first() {
        Some(best) => tracing::debug!("Approximated complexity: {}", best.name),
        None => tracing::debug!("No acceptable model among {} candidates", candidates),
    }

    ComplexityAnalysis { candidates, ranked }
}

/// Outcome of comparing two programs' runtimes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Number of input sizes both programs were measured at
    pub shared_sizes: usize,

    /// `None` when relative performance was not consistent enough
    pub verdict: Option<ImprovementVerdict>,
}

impl Comparison {
    /// Generate human-readable report naming both programs
    pub fn to_report_string(&self, first: &str, second: &str) -> String {
        match &self.verdict {
            Some(verdict) => format!(
                "✅ {}\n\nShared input sizes: {}\n",
                verdict.describe(first, second),
                self.shared_sizes
            ),
            None if self.shared_sizes == 0 => format!(
                "⚠️  NO VERDICT\n\nReason: {} and {} share no measured input sizes\n",
                first, second
            ),
            None => format!(
                "⚠️  NO VERDICT\n\nReason: relative performance of {} and {} was inconsistent across {} shared input sizes\n",
                first, second, self.shared_sizes
            ),
        }
    }
}

/// Pair two programs' samples by input size and classify the result
pub fn compare(first: &[Sample], second: &[Sample], config: &AnalysisConfig) -> Comparison {
    let pairs = paired_runtimes(first, second);
    let verdict = config.improvement.classify(&pairs);

    tracing::debug!(
        "Improvement verdict over {} shared sizes: {:?}",
        pairs.len(),
        verdict
    );

    Comparison {
        shared_sizes: pairs.len(),
        verdict,
    }
}
