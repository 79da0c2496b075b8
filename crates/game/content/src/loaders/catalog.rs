//! Mod catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_core::{Mod, Schema, StaticCatalog};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModCatalog {
    pub mods: Vec<Mod>,
}

/// Loader for the mod catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load raw mod records from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Mod>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Mod>> {
        let catalog: ModCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mod catalog RON: {}", e))?;
        Ok(catalog.mods)
    }

    /// Builds a catalog and checks every effect names a known attribute.
    pub fn build(mods: Vec<Mod>, schema: &Schema) -> LoadResult<StaticCatalog> {
        let catalog = StaticCatalog::new(mods)?;
        let unknown = catalog.unknown_attributes(schema);
        if !unknown.is_empty() {
            let listed = unknown
                .iter()
                .map(|(mod_id, attribute)| format!("{mod_id}.{attribute}"))
                .collect::<Vec<_>>()
                .join(", ");
            anyhow::bail!("Catalog effects name unknown attributes: {listed}");
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::{CatalogOracle, EffectValue, ModCategory, RequirementMode};

    use super::*;

    const SAMPLE: &str = r#"(
        mods: [
            (
                id: "e_tough",
                name: "Tough",
                category: edge,
                kind: "edg",
                prerequisites: (ids: ["sk_endurance_1"], mode: Any),
                effects: {"physical_wt_bonus": Int(1)},
                talent_cost: 3,
            ),
            (
                id: "t_nemesis",
                name: "Nemesis",
                category: trait,
                kind: "trt",
                effects: {"special_rules": Text("Hunted by %TEXT%")},
                choose_text: true,
            ),
            (
                id: "m_athletics",
                name: "Athletics Mastery",
                category: skill,
                kind: "spm",
                restrictions: (ids: ["t_frail", "t_pacifist"], mode: All),
                mastery: Some((skill: "sk_athletics_3", rank: 2)),
            ),
        ],
    )"#;

    #[test]
    fn parses_optional_fields() {
        let mods = CatalogLoader::parse(SAMPLE).unwrap();
        assert_eq!(mods.len(), 3);

        let tough = &mods[0];
        assert_eq!(tough.category, ModCategory::Edge);
        assert_eq!(tough.talent_cost, 3);
        assert_eq!(tough.prerequisites.ids, ["sk_endurance_1".to_string()]);
        assert!(tough.restrictions.is_null());
        assert_eq!(tough.effects.get("physical_wt_bonus"), Some(&EffectValue::Int(1)));

        assert!(mods[1].choose_text);
        assert_eq!(mods[2].restrictions.mode, RequirementMode::All);
        assert_eq!(mods[2].mastery.as_ref().map(|m| m.rank), Some(2));
    }

    #[test]
    fn build_rejects_unknown_attributes() {
        let mods = vec![
            Mod::new("e_odd", "Odd", ModCategory::Edge, "edg").with_int("charisma", 1),
        ];
        let err = CatalogLoader::build(mods, Schema::standard()).unwrap_err();
        assert!(err.to_string().contains("e_odd.charisma"));
    }

    #[test]
    fn build_rejects_duplicate_ids() {
        let mods = vec![
            Mod::new("e_tough", "Tough", ModCategory::Edge, "edg"),
            Mod::new("e_tough", "Tough Again", ModCategory::Edge, "edg"),
        ];
        assert!(CatalogLoader::build(mods, Schema::standard()).is_err());
    }

    #[test]
    fn build_accepts_known_attributes() {
        let mods = CatalogLoader::parse(SAMPLE).unwrap();
        let catalog = CatalogLoader::build(mods, Schema::standard()).unwrap();
        assert!(catalog.contains("t_nemesis"));
    }
}
