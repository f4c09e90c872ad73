use super::domain::{AdvisorRequest, AdvisorResponse, StatBreakdown};
use super::library::CharacterBuild;

const HIGH_SCORE_THRESHOLD: f64 = 80.0;

pub(crate) fn advise(build: &CharacterBuild) -> AdvisorResponse {
    let mains = &build.main_stats;
    let text = format!(
        "Recommended stat priority:\n{}\n\nMain stat suggestions:\n- Slot 4: {}\n- Slot 5: {}\n- Slot 6: {}",
        build.priorities.join(" ≥ "),
        mains.slot4,
        mains.slot5,
        mains.slot6
    );

    AdvisorResponse {
        text: Some(text),
        priorities: Some(build.priorities.clone()),
        main_stats: Some(mains.clone()),
        recommendation_reasons: Some(build.recommendation_reasons.clone()),
        confidence: Some(0.95),
        ..AdvisorResponse::default()
    }
}

pub(crate) fn auto_optimize(build: &CharacterBuild, character: &str, target: Option<&str>) -> AdvisorResponse {
    AdvisorResponse {
        priorities: Some(build.priorities.clone()),
        main_stats: Some(build.main_stats.clone()),
        notes: Some(format!(
            "Optimized for {}'s {} build.",
            character,
            target.unwrap_or("Max DPS")
        )),
        confidence: Some(1.0),
        recommendation_reasons: Some(build.recommendation_reasons.clone()),
        ..AdvisorResponse::default()
    }
}

pub(crate) fn explain_result(build: &CharacterBuild, request: &AdvisorRequest) -> AdvisorResponse {
    let is_high = request.score.unwrap_or(0.0) > HIGH_SCORE_THRESHOLD;
    let text = if is_high {
        "This build scores highly because it aligns well with the recommended metas."
    } else {
        "This build scores moderately because it partially matches the recommended metas."
    };

    AdvisorResponse {
        text: Some(text.to_string()),
        confidence: Some(0.88),
        breakdown: Some(breakdown(build, request.priorities.as_deref().unwrap_or_default())),
        recommendation_reasons: Some(build.recommendation_reasons.clone()),
        ..AdvisorResponse::default()
    }
}

/// Weights the build's priorities by rank, crediting the ones the caller
/// already targets, then scales contributions to sum to 1.
fn breakdown(build: &CharacterBuild, selected: &[String]) -> Vec<StatBreakdown> {
    let mut entries: Vec<StatBreakdown> = build
        .priorities
        .iter()
        .enumerate()
        .map(|(index, stat)| {
            let weight = (1.0 - index as f64 * 0.25).max(0.1);
            if selected.contains(stat) {
                StatBreakdown {
                    stat: stat.clone(),
                    contribution: weight,
                    explanation: Some(format!("Matches priority #{}", index + 1)),
                }
            } else {
                StatBreakdown {
                    stat: stat.clone(),
                    contribution: 0.05,
                    explanation: Some("Missing recommended stat".to_string()),
                }
            }
        })
        .collect();

    let total: f64 = entries.iter().map(|entry| entry.contribution).sum();
    if total > 0.0 {
        for entry in &mut entries {
            entry.contribution /= total;
        }
    }
    entries
}
