//! Fitting-quality statistics for one (model, data set) pairing
//!
//! Produced by the external regression engine; consumed here as a finished
//! result. No invariants are imposed beyond holding floating-point values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ten fitting-quality metrics for a model regressed against measured data
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct FitStatistics {
    /// Predicted mean squared error (cross-validated)
    pub pred_mse: f64,
    /// Predicted mean absolute error (cross-validated)
    pub pred_mae: f64,
    /// Total sum of squares
    pub sst: f64,
    /// Predicted residual sum of squares
    pub press: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Adjusted R²
    pub adj_r2: f64,
    /// Predicted R²
    pub pred_r2: f64,
    /// Bayesian information criterion
    pub bic: f64,
    /// Akaike information criterion
    pub aic: f64,
    /// Mallows' Cp
    pub cp: f64,
}

/// Name of a single field of [`FitStatistics`]
///
/// Lets acceptance and ranking rules refer to a statistic from a
/// configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    PredMse,
    PredMae,
    Sst,
    Press,
    R2,
    AdjR2,
    PredR2,
    Bic,
    Aic,
    Cp,
}

impl Stat {
    /// All statistics, in record order
    pub const ALL: [Stat; 10] = [
        Stat::PredMse,
        Stat::PredMae,
        Stat::Sst,
        Stat::Press,
        Stat::R2,
        Stat::AdjR2,
        Stat::PredR2,
        Stat::Bic,
        Stat::Aic,
        Stat::Cp,
    ];

    /// Short label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Stat::PredMse => "PMSE",
            Stat::PredMae => "PMAE",
            Stat::Sst => "SST",
            Stat::Press => "PRESS",
            Stat::R2 => "R²",
            Stat::AdjR2 => "Adj. R²",
            Stat::PredR2 => "Pred. R²",
            Stat::Bic => "BIC",
            Stat::Aic => "AIC",
            Stat::Cp => "Cp",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FitStatistics {
    /// Read the statistic named by `stat`
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::PredMse => self.pred_mse,
            Stat::PredMae => self.pred_mae,
            Stat::Sst => self.sst,
            Stat::Press => self.press,
            Stat::R2 => self.r2,
            Stat::AdjR2 => self.adj_r2,
            Stat::PredR2 => self.pred_r2,
            Stat::Bic => self.bic,
            Stat::Aic => self.aic,
            Stat::Cp => self.cp,
        }
    }
}
