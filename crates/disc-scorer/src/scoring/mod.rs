//! Disc scoring against a declared stat priority list.

mod domain;
mod rules;

pub use domain::{
    CalculationMode, CalculationRequest, CalculationResponse, CalculationResultDisc, Disc,
    SlotMainOverrides, DEFAULT_AUTO_FILL_SOURCE,
};

use crate::stats::StatCatalog;
use std::sync::Arc;

/// Stateless scorer bound to a read-only stat catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<StatCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<StatCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &StatCatalog {
        &self.catalog
    }

    pub fn score(&self, request: &CalculationRequest) -> CalculationResponse {
        score_with_catalog(&self.catalog, request)
    }
}

/// Scores a request against the bundled catalog.
pub fn calculate_score(request: &CalculationRequest) -> CalculationResponse {
    score_with_catalog(StatCatalog::bundled(), request)
}

fn score_with_catalog(catalog: &StatCatalog, request: &CalculationRequest) -> CalculationResponse {
    let priorities: Vec<_> = request
        .priorities
        .iter()
        .map(|raw| catalog.normalize(raw))
        .collect();

    let discs: Vec<CalculationResultDisc> = request
        .discs
        .iter()
        .map(|disc| {
            let main = rules::resolve_main(catalog, disc);
            let substats = rules::resolve_substats(catalog, disc, &main, &priorities);
            let matches = rules::matched_priorities(&substats, &priorities);
            let matches_count = matches.len();

            CalculationResultDisc {
                slot: disc.slot,
                main,
                substats,
                matches,
                matches_count,
                base: request.base_enhancement,
                score: rules::slot_score(request.base_enhancement, matches_count),
            }
        })
        .collect();

    let total_score = discs
        .iter()
        .fold(0u32, |total, disc| total.saturating_add(disc.score));

    CalculationResponse {
        discs,
        total_score,
        auto_fill_source_used: request.auto_fill_label(),
    }
}
