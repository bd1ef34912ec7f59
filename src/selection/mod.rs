// Complexity model selection
//
// Given every candidate model fitted against the same measurements, narrow
// the set to acceptable models and rank them so the best approximation of
// the program's time complexity comes first.
//
// - Acceptance: a predicate over FitStatistics (default: accept all)
// - Ranking: a comparator over FitStatistics (default: ascending predicted MSE)
// - Selection: filter, stable sort, truncate to the configured top N
//
// Ties under the ranking keep the candidates' original order. Reordering
// equally ranked models would change which model a report names.

mod select;
mod strategy;

pub use select::select;
pub use strategy::{
    default_acceptance, default_ranking, Acceptance, ModelAcceptance, ModelRanking, Ranking,
};
