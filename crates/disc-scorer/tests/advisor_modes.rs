use disc_scorer::advisor::{
    Advisor, AdvisorError, AdvisorMode, AdvisorRequest, BuildLibrary,
};
use disc_scorer::scoring::{calculate_score, CalculationRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn advisor(default_delay: Duration) -> Advisor {
    let library = BuildLibrary::bundled().expect("bundled builds parse");
    Advisor::new(Arc::new(library), default_delay)
}

#[tokio::test]
async fn advisor_mode_returns_text_and_suggestions() {
    let response = advisor(Duration::ZERO)
        .respond(AdvisorRequest::new(AdvisorMode::Advisor).character("ellen"))
        .await
        .expect("advisor responds");

    let text = response.text.expect("text present");
    assert!(text.starts_with("Recommended stat priority:\nCR ≥ CD ≥ ATK% ≥ PEN"));
    assert!(text.ends_with("- Slot 6: ATK%"));
    assert_eq!(response.confidence, Some(0.95));
    assert_eq!(
        response.priorities,
        Some(vec!["CR".into(), "CD".into(), "ATK%".into(), "PEN".into()])
    );
    assert_eq!(response.recommendation_reasons.map(|r| r.len()), Some(3));
    assert!(response.breakdown.is_none());
}

#[tokio::test]
async fn auto_optimize_names_character_and_target() {
    let advisor = advisor(Duration::ZERO);
    let response = advisor
        .respond(
            AdvisorRequest::new(AdvisorMode::AutoOptimize)
                .character("Zhu Yuan")
                .target("Boss Burst"),
        )
        .await
        .expect("advisor responds");
    assert_eq!(
        response.notes.as_deref(),
        Some("Optimized for Zhu Yuan's Boss Burst build.")
    );
    assert_eq!(response.confidence, Some(1.0));
    assert!(response.text.is_none());

    let response = advisor
        .respond(AdvisorRequest::new(AdvisorMode::AutoOptimize))
        .await
        .expect("advisor responds");
    assert_eq!(
        response.notes.as_deref(),
        Some("Optimized for Generic's Max DPS build.")
    );
    assert_eq!(
        response.main_stats.map(|mains| mains.slot5),
        Some("DMG Bonus".to_string())
    );
}

#[tokio::test]
async fn explain_result_scales_text_with_score() {
    let advisor = advisor(Duration::ZERO);
    let high = advisor
        .respond(
            AdvisorRequest::new(AdvisorMode::ExplainResult)
                .character("Nekomata")
                .score(81.0)
                .priorities(vec!["CR".into(), "ATK%".into()]),
        )
        .await
        .expect("advisor responds");
    assert!(high.text.as_deref().is_some_and(|text| text.contains("highly")));
    assert_eq!(high.confidence, Some(0.88));

    let breakdown = high.breakdown.expect("breakdown present");
    let stats: Vec<&str> = breakdown.iter().map(|entry| entry.stat.as_str()).collect();
    assert_eq!(stats, ["CR", "CD", "ATK%", "PEN"]);
    let sum: f64 = breakdown.iter().map(|entry| entry.contribution).sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(breakdown[0].contribution > breakdown[2].contribution);
    assert!(breakdown[2].contribution > breakdown[1].contribution);

    let moderate = advisor
        .respond(AdvisorRequest::new(AdvisorMode::ExplainResult).score(80.0))
        .await
        .expect("advisor responds");
    assert!(moderate
        .text
        .as_deref()
        .is_some_and(|text| text.contains("moderately")));
}

#[tokio::test]
async fn unknown_mode_fails_before_waiting() {
    let err = advisor(Duration::ZERO)
        .handle(json!({ "mode": "PREDICT_GACHA", "character": "Ellen Joe" }))
        .await
        .expect_err("unknown mode");
    assert!(matches!(err, AdvisorError::UnknownMode(ref mode) if mode == "PREDICT_GACHA"));
    assert!(err.is_request_error());
}

#[tokio::test]
async fn programmatic_delay_is_bounded() {
    let err = advisor(Duration::ZERO)
        .respond(AdvisorRequest::new(AdvisorMode::Advisor).delay_ms(5001))
        .await
        .expect_err("delay too long");
    assert!(matches!(err, AdvisorError::DelayOutOfRange(5001)));
}

#[tokio::test(start_paused = true)]
async fn request_delay_overrides_default() {
    let advisor = advisor(Duration::from_millis(150));

    let started = Instant::now();
    advisor
        .handle(json!({ "mode": "ADVISOR", "delay": 300 }))
        .await
        .expect("advisor responds");
    assert!(started.elapsed() >= Duration::from_millis(300));

    let started = Instant::now();
    advisor
        .handle(json!({ "mode": "ADVISOR" }))
        .await
        .expect("advisor responds");
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(150));
    assert!(elapsed < Duration::from_millis(300));
}

#[tokio::test]
async fn optimized_suggestion_seeds_a_scoring_request() {
    let response = advisor(Duration::ZERO)
        .respond(AdvisorRequest::new(AdvisorMode::AutoOptimize).character("Grace Howard"))
        .await
        .expect("advisor responds");

    let priorities = response.priorities.expect("priorities present");
    let overrides = response
        .main_stats
        .expect("main stats present")
        .to_overrides();
    let request = CalculationRequest::standard(priorities, 5, &overrides);
    let scored = calculate_score(&request);

    assert_eq!(scored.discs[3].main.as_str(), "AP");
    assert_eq!(scored.discs[4].main.as_str(), "Pen Ratio");
    assert_eq!(scored.discs[5].main.as_str(), "AM");
    // Slot 4 carries AP as main, so only three priorities remain as substats.
    assert_eq!(scored.discs[3].matches_count, 3);
    assert_eq!(scored.discs[3].score, 8);
}
