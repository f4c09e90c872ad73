use crate::stats::{MainStat, StatId};
use serde::{Deserialize, Serialize};

/// Auto-fill label used when a request does not name one.
pub const DEFAULT_AUTO_FILL_SOURCE: &str = "default";

/// Scoring mode. Only the simple additive formula exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    #[default]
    Simple,
}

/// A disc as declared by the caller. Strings are raw and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disc {
    pub slot: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substats: Option<Vec<String>>,
}

impl Disc {
    pub fn bare(slot: u8) -> Self {
        Self {
            slot,
            ..Self::default()
        }
    }

    pub fn with_main(slot: u8, main: impl Into<String>) -> Self {
        Self {
            slot,
            main: Some(main.into()),
            substats: None,
        }
    }

    pub fn with_substats<I, S>(mut self, substats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.substats = Some(substats.into_iter().map(Into::into).collect());
        self
    }

    /// A main stat counts as declared only when it is non-empty.
    pub(crate) fn declared_main(&self) -> Option<&str> {
        self.main.as_deref().filter(|main| !main.is_empty())
    }

    pub(crate) fn declared_substats(&self) -> &[String] {
        self.substats.as_deref().unwrap_or_default()
    }
}

/// Optional main-stat choices for the three configurable slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMainOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot6: Option<String>,
}

impl SlotMainOverrides {
    fn for_slot(&self, slot: u8) -> Option<String> {
        let value = match slot {
            4 => self.slot4.as_ref(),
            5 => self.slot5.as_ref(),
            6 => self.slot6.as_ref(),
            _ => None,
        };
        value.filter(|main| !main.trim().is_empty()).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Stat names, most important first.
    pub priorities: Vec<String>,
    pub base_enhancement: u32,
    #[serde(default)]
    pub mode: CalculationMode,
    pub discs: Vec<Disc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_fill_source: Option<String>,
}

impl CalculationRequest {
    /// The request a full set produces when only slots 4–6 carry main-stat
    /// choices and every substat is left to auto-fill.
    pub fn standard(
        priorities: Vec<String>,
        base_enhancement: u32,
        overrides: &SlotMainOverrides,
    ) -> Self {
        let discs = (1..=crate::stats::SLOT_COUNT)
            .map(|slot| Disc {
                slot,
                main: overrides.for_slot(slot),
                substats: None,
            })
            .collect();

        Self {
            priorities,
            base_enhancement,
            mode: CalculationMode::Simple,
            discs,
            auto_fill_source: Some(DEFAULT_AUTO_FILL_SOURCE.to_string()),
        }
    }

    pub(crate) fn auto_fill_label(&self) -> String {
        self.auto_fill_source
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTO_FILL_SOURCE.to_string())
    }
}

/// Resolution and score for a single disc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationResultDisc {
    pub slot: u8,
    pub main: MainStat,
    pub substats: Vec<StatId>,
    pub matches: Vec<StatId>,
    pub matches_count: usize,
    pub base: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationResponse {
    pub discs: Vec<CalculationResultDisc>,
    pub total_score: u32,
    pub auto_fill_source_used: String,
}
