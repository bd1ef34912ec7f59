//! Perfverdict - statistical core of automated performance testing
//!
//! Turns fitted regression statistics into a ranked list of candidate
//! complexity models, and paired runtime samples into an improvement
//! verdict for two programs. Measurement, regression fitting and rendering
//! are external collaborators; everything here is pure and deterministic.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod fit_stats;
pub mod improvement;
pub mod model;
pub mod samples;
pub mod selection;
