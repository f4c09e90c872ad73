use super::{StatCatalog, StatId, StatInfo, StatTemplate};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static BUNDLED_CATALOG: OnceLock<StatCatalog> = OnceLock::new();

pub(crate) fn bundled_catalog() -> &'static StatCatalog {
    BUNDLED_CATALOG.get_or_init(|| {
        // Order matters: the first entry whose id or alias matches wins.
        const STATS: &[(&str, &str, &[&str])] = &[
            ("HP", "HP", &["Flat HP", "HP Flat"]),
            ("HP%", "HP Percent", &["HP Percent", "HP %", "HP Pct"]),
            ("ATK", "ATK", &["Attack", "Flat ATK", "ATK Flat"]),
            ("ATK%", "ATK Percent", &["ATK Percent", "Attack%", "ATK %", "ATK Pct"]),
            ("DEF", "DEF", &["Defense", "Flat DEF", "DEF Flat"]),
            ("DEF%", "DEF Percent", &["DEF Percent", "Defense%", "DEF %", "DEF Pct"]),
            ("PEN", "PEN", &["Penetration", "Flat PEN", "PEN Flat"]),
            ("Pen Ratio", "PEN Ratio", &["PEN%", "Penetration Ratio", "PenRatio"]),
            ("CR", "CRIT Rate", &["Crit Rate", "CRIT", "Crit%"]),
            ("CD", "CRIT DMG", &["Crit DMG", "Crit Damage", "CDMG"]),
            ("AP", "Anomaly Proficiency", &["Anomaly Proficiency", "Proficiency"]),
            ("AM", "Anomaly Mastery", &["Anomaly Mastery", "Mastery"]),
            ("Impact", "Impact", &["IMP"]),
            ("ER", "Energy Regen", &["Energy Regen", "Energy Regeneration", "Energy"]),
            (
                "DMG Bonus",
                "Attribute DMG Bonus",
                &["DMG%", "Elemental DMG", "Attribute DMG", "Element DMG Bonus"],
            ),
        ];

        const TEMPLATES: &[(&str, &str, &[&str])] = &[
            ("anomaly", "Anomaly", &["AP", "ATK%", "PEN", "ATK"]),
            ("defense", "Defense", &["DEF%", "CR", "CD", "DEF"]),
            ("dps", "Crit DPS", &["CR", "CD", "ATK%", "PEN"]),
            ("support", "Support", &["HP%", "DEF%", "AP", "CR"]),
        ];

        let stats = STATS
            .iter()
            .map(|(id, name, aliases)| StatInfo {
                id: StatId::from(*id),
                name: (*name).to_string(),
                aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
            })
            .collect();

        let templates = TEMPLATES
            .iter()
            .map(|(key, name, substats)| {
                (
                    (*key).to_string(),
                    StatTemplate {
                        name: (*name).to_string(),
                        substats: substats.iter().map(|stat| StatId::from(*stat)).collect(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();

        StatCatalog { stats, templates }
    })
}
