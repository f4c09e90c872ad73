use super::domain::MainStatSuggestion;
use super::matcher;
use super::AdvisorError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

const BUNDLED_BUILDS: &str = include_str!("../../config/builds.json");

/// Canned recommendation for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBuild {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub priorities: Vec<String>,
    pub main_stats: MainStatSuggestion,
    pub advisor: String,
    #[serde(default)]
    pub recommendation_reasons: Vec<String>,
}

impl CharacterBuild {
    /// Build returned when no character matches.
    pub fn generic() -> Self {
        Self {
            id: "generic".to_string(),
            name: "Generic".to_string(),
            aliases: Vec::new(),
            priorities: ["ATK%", "CR", "CD", "AP"].map(String::from).to_vec(),
            main_stats: MainStatSuggestion {
                slot4: "ATK%".to_string(),
                slot5: "DMG Bonus".to_string(),
                slot6: "ATK%".to_string(),
            },
            advisor: "Generic DPS build prioritizing ATK and Crit. Adjust according to specific character scaling.".to_string(),
            recommendation_reasons: [
                "Balanced ATK and Crit for generic DPS roles",
                "Higher consistency for multi-hit characters",
                "Slot 5 DMG Bonus provides highest multiplicative return",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildsFile {
    version: String,
    last_updated: NaiveDate,
    characters: Vec<CharacterBuild>,
}

/// Read-only set of character builds plus the generic fallback.
#[derive(Debug, Clone)]
pub struct BuildLibrary {
    version: String,
    last_updated: NaiveDate,
    characters: Vec<CharacterBuild>,
    fallback: CharacterBuild,
}

impl BuildLibrary {
    pub fn bundled() -> Result<Self, AdvisorError> {
        Self::from_reader(BUNDLED_BUILDS.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AdvisorError> {
        let file: BuildsFile =
            serde_json::from_reader(reader).map_err(AdvisorError::InvalidLibrary)?;
        Ok(Self {
            version: file.version,
            last_updated: file.last_updated,
            characters: file.characters,
            fallback: CharacterBuild::generic(),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AdvisorError> {
        let file = std::fs::File::open(path).map_err(AdvisorError::LibraryIo)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn last_updated(&self) -> NaiveDate {
        self.last_updated
    }

    pub fn characters(&self) -> &[CharacterBuild] {
        &self.characters
    }

    /// Looks a character up by name, falling back to the generic build.
    pub fn find(&self, name: Option<&str>) -> &CharacterBuild {
        name.and_then(|name| matcher::find_build(&self.characters, name))
            .unwrap_or(&self.fallback)
    }
}
