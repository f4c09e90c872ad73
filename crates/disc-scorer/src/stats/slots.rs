//! Literal slot rules: which main stats each slot may roll and the shared
//! substat pool.

use super::StatId;
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of disc slots in a full set.
pub const SLOT_COUNT: u8 = 6;

/// Maximum substats a disc can carry.
pub const MAX_SUBSTATS: usize = 4;

/// Wire marker for slots 4–6 when no valid main stat was declared.
pub const UNRESOLVED_MAIN: &str = "?";

const SLOT_1_MAINS: &[&str] = &["HP"];
const SLOT_2_MAINS: &[&str] = &["ATK"];
const SLOT_3_MAINS: &[&str] = &["DEF"];
const SLOT_4_MAINS: &[&str] = &["HP%", "ATK%", "DEF%", "CR", "CD", "AP"];
const SLOT_5_MAINS: &[&str] = &["HP%", "ATK%", "DEF%", "Pen Ratio", "DMG Bonus"];
const SLOT_6_MAINS: &[&str] = &["HP%", "ATK%", "DEF%", "AM", "Impact", "ER"];

const VALID_SUB_STATS: &[&str] = &[
    "HP", "HP%", "ATK", "ATK%", "DEF", "DEF%", "PEN", "CR", "CD", "AP",
];

/// Main stats a slot may carry, in menu order. Unknown slots have no menu.
pub fn valid_main_stats(slot: u8) -> &'static [&'static str] {
    match slot {
        1 => SLOT_1_MAINS,
        2 => SLOT_2_MAINS,
        3 => SLOT_3_MAINS,
        4 => SLOT_4_MAINS,
        5 => SLOT_5_MAINS,
        6 => SLOT_6_MAINS,
        _ => &[],
    }
}

/// The substat pool shared by every slot, in catalog order.
pub fn valid_sub_stats() -> &'static [&'static str] {
    VALID_SUB_STATS
}

pub(crate) fn is_main_stat_for(slot: u8, id: &StatId) -> bool {
    valid_main_stats(slot).contains(&id.as_str())
}

pub(crate) fn is_sub_stat(id: &StatId) -> bool {
    VALID_SUB_STATS.contains(&id.as_str())
}

/// Resolved main stat of a disc.
///
/// Slots 1–3 always resolve to a stat. Slots 4–6 have no single default, so a
/// missing or invalid declaration stays [`MainStat::Unresolved`] rather than
/// inventing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainStat {
    Resolved(StatId),
    Unresolved,
}

impl MainStat {
    pub fn stat(&self) -> Option<&StatId> {
        match self {
            MainStat::Resolved(id) => Some(id),
            MainStat::Unresolved => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MainStat::Resolved(id) => id.as_str(),
            MainStat::Unresolved => UNRESOLVED_MAIN,
        }
    }
}

impl fmt::Display for MainStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MainStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Main stat assigned when a slot has no valid declaration.
pub fn default_main_stat(slot: u8) -> MainStat {
    match slot {
        1 => MainStat::Resolved(StatId::from("HP")),
        2 => MainStat::Resolved(StatId::from("ATK")),
        3 => MainStat::Resolved(StatId::from("DEF")),
        _ => MainStat::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_slots_have_single_menu_entry() {
        for slot in 1..=3 {
            assert_eq!(valid_main_stats(slot).len(), 1);
        }
        assert_eq!(valid_main_stats(4).len(), 6);
        assert_eq!(valid_main_stats(5).len(), 5);
        assert_eq!(valid_main_stats(6).len(), 6);
        assert!(valid_main_stats(0).is_empty());
        assert!(valid_main_stats(7).is_empty());
    }

    #[test]
    fn substat_pool_has_ten_entries_in_order() {
        assert_eq!(valid_sub_stats().len(), 10);
        assert_eq!(valid_sub_stats()[0], "HP");
        assert_eq!(valid_sub_stats()[9], "AP");
    }

    #[test]
    fn defaults_follow_slot_number() {
        assert_eq!(default_main_stat(1).as_str(), "HP");
        assert_eq!(default_main_stat(2).as_str(), "ATK");
        assert_eq!(default_main_stat(3).as_str(), "DEF");
        for slot in [4, 5, 6, 0, 9] {
            assert_eq!(default_main_stat(slot), MainStat::Unresolved);
        }
    }

    #[test]
    fn unresolved_serializes_as_marker() {
        let json = serde_json::to_string(&MainStat::Unresolved).expect("serialize");
        assert_eq!(json, "\"?\"");
    }
}
