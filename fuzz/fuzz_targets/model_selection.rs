#![no_main]

use libfuzzer_sys::fuzz_target;
use perfverdict::fit_stats::FitStatistics;
use perfverdict::improvement::{default_improvement_classifier, ImprovementClassifier};
use perfverdict::model::LinearType;
use perfverdict::selection::{select, Acceptance, ModelAcceptance, Ranking};

fuzz_target!(|input: (Vec<(LinearType, FitStatistics)>, u8, Vec<(f64, f64)>)| {
    let (candidates, top_n, pairs) = input;

    for (model, _) in &candidates {
        let _ = model.name();
        // equation length grows with the degree
        if model.num_coefficients() <= 64 {
            let _ = model.equation();
        }
    }

    let accept = Acceptance::All;
    let ranked = select(candidates, &accept, &Ranking::default(), top_n as usize);
    assert!(ranked.len() <= top_n as usize);
    assert!(ranked.iter().all(|(_, stats)| accept.accept(stats)));

    if let Some(verdict) = default_improvement_classifier().classify(&pairs) {
        assert!(verdict.confidence > 0.0 && verdict.confidence <= 1.0);
    }
});
