// Model selection: filter unacceptable fits, rank the rest, keep the top N

use crate::fit_stats::FitStatistics;
use crate::model::LinearType;
use crate::selection::strategy::{ModelAcceptance, ModelRanking};

/// Filter, rank and truncate fitted candidate models
///
/// 1. Keeps only candidates whose statistics satisfy `accept`.
/// 2. Stable-sorts the remainder ascending by `rank`; equally ranked models
///    keep their original relative order.
/// 3. Truncates to the first `top_n` entries.
///
/// An empty result means no model was deemed acceptable. It is a valid
/// outcome, not an error.
///
/// # Example
/// ```
/// use perfverdict::fit_stats::FitStatistics;
/// use perfverdict::model::LinearType;
/// use perfverdict::selection::{select, Acceptance, Ranking};
///
/// let fit = |pred_mse| FitStatistics { pred_mse, ..Default::default() };
/// let candidates = vec![
///     (LinearType::Poly(1), fit(4.0)),
///     (LinearType::Poly(2), fit(1.0)),
///     (LinearType::Exp(2), fit(9.0)),
/// ];
///
/// let ranked = select(candidates, &Acceptance::All, &Ranking::default(), 2);
/// assert_eq!(ranked[0].0, LinearType::Poly(2));
/// assert_eq!(ranked.len(), 2);
/// ```
pub fn select<A, R>(
    candidates: Vec<(LinearType, FitStatistics)>,
    accept: &A,
    rank: &R,
    top_n: usize,
) -> Vec<(LinearType, FitStatistics)>
where
    A: ModelAcceptance + ?Sized,
    R: ModelRanking + ?Sized,
{
    let total = candidates.len();

    let mut accepted: Vec<(LinearType, FitStatistics)> = candidates
        .into_iter()
        .filter(|(_, stats)| accept.accept(stats))
        .collect();

    tracing::debug!(
        "Model selection: {} of {} candidates accepted, keeping top {}",
        accepted.len(),
        total,
        top_n
    );

    // slice::sort_by is stable
    accepted.sort_by(|(_, a), (_, b)| rank.compare(a, b));
    accepted.truncate(top_n);

    accepted
}
