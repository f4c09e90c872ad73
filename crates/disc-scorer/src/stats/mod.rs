//! Stat catalog and name normalization.
//!
//! The catalog is an ordered list of stats with their aliases. Lookups walk it
//! in declaration order, so the order a catalog is loaded in is part of its
//! observable behavior.

mod bundled;
mod normalizer;
pub mod slots;

pub(crate) use normalizer::compact_name;
pub use slots::{
    default_main_stat, valid_main_stats, valid_sub_stats, MainStat, MAX_SUBSTATS, SLOT_COUNT,
    UNRESOLVED_MAIN,
};

use normalizer::fold_stat_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Display form of a stat name that did not resolve to any catalog entry.
pub const UNKNOWN_STAT: &str = "UNK";

/// Canonical stat identifier, e.g. `ATK%` or `Pen Ratio`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatId(String);

impl StatId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StatId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for StatId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StatId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatInfo {
    pub id: StatId,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl StatInfo {
    fn matches_folded(&self, folded: &str) -> bool {
        fold_stat_name(self.id.as_str()) == folded
            || self
                .aliases
                .iter()
                .any(|alias| fold_stat_name(alias) == folded)
    }
}

/// Named substat preset shipped with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTemplate {
    pub name: String,
    pub substats: Vec<StatId>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read stat catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid stat catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stat id '{0}' is declared more than once")]
    DuplicateId(String),
    #[error("stat catalog is empty")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    stats: Vec<StatInfo>,
    #[serde(default)]
    templates: BTreeMap<String, StatTemplate>,
}

/// Read-only stat catalog, loaded once and shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCatalog {
    stats: Vec<StatInfo>,
    templates: BTreeMap<String, StatTemplate>,
}

impl StatCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    ///
    /// Aliases shared by several entries are allowed; the earliest entry keeps
    /// them and a warning is logged.
    pub fn new(
        stats: Vec<StatInfo>,
        templates: BTreeMap<String, StatTemplate>,
    ) -> Result<Self, CatalogError> {
        if stats.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = HashSet::new();
        for info in &stats {
            if !ids.insert(fold_stat_name(info.id.as_str())) {
                return Err(CatalogError::DuplicateId(info.id.to_string()));
            }
        }

        let mut owners: HashMap<String, &StatId> = HashMap::new();
        for info in &stats {
            let keys = std::iter::once(info.id.as_str())
                .chain(info.aliases.iter().map(String::as_str))
                .map(fold_stat_name);
            for key in keys {
                match owners.get(&key) {
                    Some(owner) if *owner != &info.id => {
                        warn!(
                            alias = %key,
                            kept = %owner,
                            shadowed = %info.id,
                            "stat alias claimed by more than one catalog entry"
                        );
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(key, &info.id);
                    }
                }
            }
        }

        Ok(Self { stats, templates })
    }

    /// The catalog compiled into the crate.
    pub fn bundled() -> &'static StatCatalog {
        bundled::bundled_catalog()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_reader(reader)?;
        Self::new(file.stats, file.templates)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Resolves a raw stat name to its canonical id.
    ///
    /// Each entry is checked against its id first and then its aliases,
    /// ignoring case and surrounding whitespace. `None` means unknown.
    pub fn normalize(&self, raw: &str) -> Option<StatId> {
        let folded = fold_stat_name(raw);
        self.stats
            .iter()
            .find(|info| info.matches_folded(&folded))
            .map(|info| info.id.clone())
    }

    /// Like [`normalize`](Self::normalize) but yields [`UNKNOWN_STAT`] for misses.
    pub fn normalize_label(&self, raw: &str) -> String {
        self.normalize(raw)
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNKNOWN_STAT.to_string())
    }

    pub fn is_valid_main_stat(&self, slot: u8, raw: &str) -> bool {
        self.normalize(raw)
            .is_some_and(|id| slots::is_main_stat_for(slot, &id))
    }

    pub fn is_valid_sub_stat(&self, raw: &str) -> bool {
        self.normalize(raw).is_some_and(|id| slots::is_sub_stat(&id))
    }

    pub fn stats(&self) -> &[StatInfo] {
        &self.stats
    }

    pub fn get(&self, id: &StatId) -> Option<&StatInfo> {
        self.stats.iter().find(|info| &info.id == id)
    }

    pub fn templates(&self) -> &BTreeMap<String, StatTemplate> {
        &self.templates
    }

    pub fn template(&self, key: &str) -> Option<&StatTemplate> {
        self.templates.get(key)
    }
}

/// Serializable snapshot of the catalog and slot rules for clients.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub stats: Vec<StatInfo>,
    pub main_stats: BTreeMap<u8, Vec<&'static str>>,
    pub sub_stats: Vec<&'static str>,
    pub templates: BTreeMap<String, StatTemplate>,
}

impl CatalogView {
    pub fn from_catalog(catalog: &StatCatalog) -> Self {
        Self {
            stats: catalog.stats.clone(),
            main_stats: (1..=SLOT_COUNT)
                .map(|slot| (slot, valid_main_stats(slot).to_vec()))
                .collect(),
            sub_stats: valid_sub_stats().to_vec(),
            templates: catalog.templates.clone(),
        }
    }
}
