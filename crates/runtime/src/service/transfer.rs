//! JSON export and import of character records.
//!
//! An export is a versioned envelope around the raw record. Import checks
//! the whole document against the catalog and the node graph before anything
//! is written, and reports every unknown mod id and location at once.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheet_core::{CatalogOracle, CharacterRecord, NodeGraph};

use super::error::ImportError;

/// Current export envelope version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterExport {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub character: CharacterRecord,
}

impl CharacterExport {
    pub fn new(character: CharacterRecord) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            exported_at: Utc::now(),
            character,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a document and checks its version.
    pub fn from_json(document: &str) -> Result<Self, ImportError> {
        let export: Self = serde_json::from_str(document).map_err(ImportError::Malformed)?;
        if export.format_version != FORMAT_VERSION {
            return Err(ImportError::UnsupportedVersion {
                found: export.format_version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(export)
    }

    /// Checks every placed mod and every location of the record.
    ///
    /// Stored overrides and text entries are checked too, so a record that
    /// passes replays without unknown-mod warnings.
    pub fn validate(
        &self,
        catalog: &dyn CatalogOracle,
        graph: &NodeGraph,
    ) -> Result<(), ImportError> {
        let record = &self.character;

        let unknown_mods: BTreeSet<String> = record
            .nodes
            .mod_ids()
            .into_iter()
            .chain(record.stored_overrides.iter().map(String::as_str))
            .chain(
                record
                    .text_replace_mods
                    .values()
                    .flat_map(|texts| texts.keys().map(String::as_str)),
            )
            .filter(|mod_id| !catalog.contains(mod_id))
            .map(str::to_string)
            .collect();

        let unknown_locations: BTreeSet<String> = record
            .nodes
            .locations()
            .chain(record.text_replace_mods.keys().map(String::as_str))
            .filter(|location| !graph.contains(location))
            .map(str::to_string)
            .collect();
        let mods: Vec<String> = unknown_mods.into_iter().collect();
        let locations: Vec<String> = unknown_locations.into_iter().collect();
        match (mods.is_empty(), locations.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => Err(ImportError::UnknownMods(mods)),
            (true, false) => Err(ImportError::UnknownLocations(locations)),
            (false, false) => Err(ImportError::UnknownReferences { mods, locations }),
        }
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::{Mod, ModCategory, StaticCatalog};

    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new([
            Mod::new("e_tough", "Tough", ModCategory::Edge, "edg"),
            Mod::new("t_nemesis", "Nemesis", ModCategory::Trait, "trt"),
        ])
        .unwrap()
    }

    fn record() -> CharacterRecord {
        CharacterRecord::new(9, "Ash", 1, NodeGraph::standard())
    }

    #[test]
    fn clean_record_validates() {
        let mut character = record();
        character.nodes.set("endurance_edge_n0", "e_tough");
        character.store_text("trait_n0", "t_nemesis", "the Baron");
        let export = CharacterExport::new(character);
        assert!(export.validate(&catalog(), NodeGraph::standard()).is_ok());
    }

    #[test]
    fn every_unknown_mod_is_listed() {
        let mut character = record();
        character.nodes.set("trait_n0", "t_missing");
        character.nodes.set("trait_n1", "e_tough");
        character.nodes.set("trait_n2", "e_does_not_exist");
        character.stored_overrides.push("t_missing".into());

        let err = CharacterExport::new(character)
            .validate(&catalog(), NodeGraph::standard())
            .unwrap_err();
        match err {
            ImportError::UnknownMods(ids) => {
                assert_eq!(ids, ["e_does_not_exist".to_string(), "t_missing".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_locations_are_rejected() {
        let mut character = record();
        character.nodes.set("tail_n0", "e_tough");
        let err = CharacterExport::new(character)
            .validate(&catalog(), NodeGraph::standard())
            .unwrap_err();
        assert!(err.to_string().contains("tail_n0"));
    }

    #[test]
    fn unknown_mods_and_locations_are_reported_together() {
        let mut character = record();
        character.nodes.set("trait_n0", "t_missing");
        character.nodes.set("tail_n0", "e_tough");
        character.store_text("horn_n0", "t_nemesis", "the Baron");

        let err = CharacterExport::new(character)
            .validate(&catalog(), NodeGraph::standard())
            .unwrap_err();
        match &err {
            ImportError::UnknownReferences { mods, locations } => {
                assert_eq!(mods, &["t_missing".to_string()]);
                assert_eq!(locations, &["horn_n0".to_string(), "tail_n0".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("t_missing"));
        assert!(message.contains("tail_n0"));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let mut export = CharacterExport::new(record());
        export.format_version = 99;
        let document = export.to_json().unwrap();
        assert!(matches!(
            CharacterExport::from_json(&document),
            Err(ImportError::UnsupportedVersion { found: 99, .. })
        ));
        assert!(matches!(
            CharacterExport::from_json("{"),
            Err(ImportError::Malformed(_))
        ));
    }
}
