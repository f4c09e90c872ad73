use super::AdvisorError;
use crate::scoring::SlotMainOverrides;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Upper bound on the simulated advisor latency, in milliseconds.
pub const MAX_ADVISOR_DELAY_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisorMode {
    Advisor,
    AutoOptimize,
    ExplainResult,
}

impl AdvisorMode {
    pub fn label(&self) -> &'static str {
        match self {
            AdvisorMode::Advisor => "ADVISOR",
            AdvisorMode::AutoOptimize => "AUTO_OPTIMIZE",
            AdvisorMode::ExplainResult => "EXPLAIN_RESULT",
        }
    }
}

impl fmt::Display for AdvisorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AdvisorMode {
    type Err = AdvisorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADVISOR" => Ok(Self::Advisor),
            "AUTO_OPTIMIZE" => Ok(Self::AutoOptimize),
            "EXPLAIN_RESULT" => Ok(Self::ExplainResult),
            other => Err(AdvisorError::UnknownMode(other.to_string())),
        }
    }
}

/// Main-stat hints a caller may attach to a request. Every slot is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainStatHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot6: Option<String>,
}

/// Wire shape of an advisor request before the mode is checked.
#[derive(Debug, Deserialize)]
struct RawAdvisorRequest {
    mode: String,
    #[serde(default)]
    character: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    team_style: Option<String>,
    #[serde(default)]
    current_stats: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    priorities: Option<Vec<String>>,
    #[serde(default, rename = "mainStats")]
    main_stats: Option<MainStatHints>,
    #[serde(default)]
    substats: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    delay: Option<f64>,
}

/// A validated advisor request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorRequest {
    pub mode: AdvisorMode,
    pub character: Option<String>,
    pub role: Option<String>,
    pub team_style: Option<String>,
    pub current_stats: Option<BTreeMap<String, f64>>,
    pub target: Option<String>,
    pub score: Option<f64>,
    pub priorities: Option<Vec<String>>,
    pub main_stats: Option<MainStatHints>,
    pub substats: Option<BTreeMap<String, f64>>,
    /// Simulated latency in milliseconds; `None` uses the advisor default.
    pub delay_ms: Option<u64>,
}

impl AdvisorRequest {
    pub fn new(mode: AdvisorMode) -> Self {
        Self {
            mode,
            character: None,
            role: None,
            team_style: None,
            current_stats: None,
            target: None,
            score: None,
            priorities: None,
            main_stats: None,
            substats: None,
            delay_ms: None,
        }
    }

    pub fn character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn priorities(mut self, priorities: Vec<String>) -> Self {
        self.priorities = Some(priorities);
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Validates an untyped JSON request.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AdvisorError> {
        let raw: RawAdvisorRequest =
            serde_json::from_value(value).map_err(AdvisorError::InvalidRequest)?;
        Self::from_raw(raw)
    }

    pub(crate) fn check_delay(&self) -> Result<(), AdvisorError> {
        match self.delay_ms {
            Some(delay) if delay > MAX_ADVISOR_DELAY_MS => Err(AdvisorError::DelayOutOfRange(delay)),
            _ => Ok(()),
        }
    }
}

impl AdvisorRequest {
    fn from_raw(raw: RawAdvisorRequest) -> Result<Self, AdvisorError> {
        let mode = raw.mode.parse::<AdvisorMode>()?;
        let delay_ms = raw.delay.map(delay_millis).transpose()?;

        let request = Self {
            mode,
            character: raw.character,
            role: raw.role,
            team_style: raw.team_style,
            current_stats: raw.current_stats,
            target: raw.target,
            score: raw.score,
            priorities: raw.priorities,
            main_stats: raw.main_stats,
            substats: raw.substats,
            delay_ms,
        };
        request.check_delay()?;
        Ok(request)
    }
}

/// Rounds to whole milliseconds; the upper bound is left to `check_delay`.
fn delay_millis(delay: f64) -> Result<u64, AdvisorError> {
    if !delay.is_finite() || delay < 0.0 {
        return Err(AdvisorError::InvalidDelay(delay));
    }
    Ok(delay.round() as u64)
}

/// Suggested main stats for the three configurable slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainStatSuggestion {
    pub slot4: String,
    pub slot5: String,
    pub slot6: String,
}

impl MainStatSuggestion {
    pub fn to_overrides(&self) -> SlotMainOverrides {
        SlotMainOverrides {
            slot4: Some(self.slot4.clone()),
            slot5: Some(self.slot5.clone()),
            slot6: Some(self.slot6.clone()),
        }
    }
}

/// One entry of an explained score, contributions sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBreakdown {
    pub stat: String,
    pub contribution: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_stats: Option<MainStatSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<StatBreakdown>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_reasons: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_request() {
        let request = AdvisorRequest::from_value(json!({
            "mode": "EXPLAIN_RESULT",
            "character": "Ellen Joe",
            "role": "attacker",
            "team_style": "freeze",
            "current_stats": { "ATK": 2800.0 },
            "score": 42,
            "priorities": ["CR", "CD"],
            "mainStats": { "slot4": "CR" },
            "substats": { "CR": 3.0 },
            "delay": 400
        }))
        .expect("valid request");

        assert_eq!(request.mode, AdvisorMode::ExplainResult);
        assert_eq!(request.score, Some(42.0));
        assert_eq!(request.delay_ms, Some(400));
        assert_eq!(
            request.main_stats.and_then(|hints| hints.slot4).as_deref(),
            Some("CR")
        );
    }

    #[test]
    fn unknown_mode_is_distinguishable() {
        let err = AdvisorRequest::from_value(json!({ "mode": "TELL_ME_A_STORY" }))
            .expect_err("unknown mode");
        assert!(matches!(err, AdvisorError::UnknownMode(mode) if mode == "TELL_ME_A_STORY"));
    }

    #[test]
    fn mode_is_case_sensitive() {
        let err = AdvisorRequest::from_value(json!({ "mode": "advisor" })).expect_err("lowercase");
        assert!(matches!(err, AdvisorError::UnknownMode(_)));
    }

    #[test]
    fn missing_mode_is_an_invalid_request() {
        let err = AdvisorRequest::from_value(json!({ "character": "Neko" })).expect_err("no mode");
        assert!(matches!(err, AdvisorError::InvalidRequest(_)));
    }

    #[test]
    fn delay_must_stay_within_bounds() {
        let err = AdvisorRequest::from_value(json!({ "mode": "ADVISOR", "delay": 5001 }))
            .expect_err("too slow");
        assert!(matches!(err, AdvisorError::DelayOutOfRange(5001)));

        let err = AdvisorRequest::from_value(json!({ "mode": "ADVISOR", "delay": -1 }))
            .expect_err("negative");
        assert!(matches!(err, AdvisorError::InvalidDelay(delay) if delay == -1.0));
        assert_eq!(
            err.to_string(),
            "advisor delay -1 is not a non-negative number of milliseconds"
        );

        let err = AdvisorRequest::from_value(json!({ "mode": "ADVISOR", "delay": 5000.6 }))
            .expect_err("rounds past the bound");
        assert_eq!(err.to_string(), "advisor delay 5001ms is outside 0..=5000ms");

        let ok = AdvisorRequest::from_value(json!({ "mode": "ADVISOR", "delay": 5000 }))
            .expect("upper bound is inclusive");
        assert_eq!(ok.delay_ms, Some(5000));
    }

    #[test]
    fn response_omits_absent_fields() {
        let response = AdvisorResponse {
            notes: Some("n".to_string()),
            recommendation_reasons: Some(vec!["r".to_string()]),
            ..AdvisorResponse::default()
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value, json!({ "notes": "n", "recommendationReasons": ["r"] }));
    }
}
