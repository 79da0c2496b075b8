//! Read-only catalog access.

use std::collections::BTreeMap;

use super::types::{Mod, ModCategory};
use crate::error::CatalogError;
use crate::schema::Schema;

/// Read-only lookup of catalog mods.
///
/// The engine never mutates the catalog; implementations may be backed by a
/// file, an embedded table, or a fixture built in a test.
pub trait CatalogOracle {
    /// Returns the mod with `mod_id`, or `None` for an unknown id.
    fn lookup(&self, mod_id: &str) -> Option<&Mod>;

    /// Iterates every mod in a stable order.
    fn iter(&self) -> Box<dyn Iterator<Item = &Mod> + '_>;

    /// Equality/prefix filter over the catalog.
    fn search(&self, query: &ModQuery) -> Vec<&Mod> {
        self.iter().filter(|m| query.matches(m)).collect()
    }

    fn contains(&self, mod_id: &str) -> bool {
        self.lookup(mod_id).is_some()
    }
}

/// Filter for [`CatalogOracle::search`]. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModQuery {
    pub category: Option<ModCategory>,
    pub kind: Option<String>,
    /// Case-insensitive prefix of the display name.
    pub name_prefix: Option<String>,
}

impl ModQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: ModCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn matches(&self, candidate: &Mod) -> bool {
        if self.category.is_some_and(|category| category != candidate.category) {
            return false;
        }
        if self.kind.as_deref().is_some_and(|kind| kind != candidate.kind) {
            return false;
        }
        match &self.name_prefix {
            Some(prefix) => candidate
                .name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase()),
            None => true,
        }
    }
}

/// In-memory catalog keyed by mod id.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    mods: BTreeMap<String, Mod>,
}

impl StaticCatalog {
    /// Builds a catalog, rejecting duplicate ids and unnamed mods.
    pub fn new(mods: impl IntoIterator<Item = Mod>) -> Result<Self, CatalogError> {
        let mut table = BTreeMap::new();
        for m in mods {
            if m.name.trim().is_empty() {
                return Err(CatalogError::MissingName { mod_id: m.id });
            }
            if table.contains_key(&m.id) {
                return Err(CatalogError::DuplicateMod(m.id));
            }
            table.insert(m.id.clone(), m);
        }
        Ok(Self { mods: table })
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Lists `(mod_id, attribute)` pairs whose attribute the schema does not
    /// know. Such effects would be skipped at application time.
    pub fn unknown_attributes(&self, schema: &Schema) -> Vec<(String, String)> {
        self.mods
            .values()
            .flat_map(|m| {
                m.effects
                    .keys()
                    .filter(|attr| schema.get(attr).is_none() && !schema.is_protected(attr))
                    .map(|attr| (m.id.clone(), attr.clone()))
            })
            .collect()
    }
}

impl CatalogOracle for StaticCatalog {
    fn lookup(&self, mod_id: &str) -> Option<&Mod> {
        self.mods.get(mod_id)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Mod> + '_> {
        Box::new(self.mods.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EffectValue;

    fn sample() -> StaticCatalog {
        StaticCatalog::new([
            Mod::new("e_tough", "Tough", ModCategory::Edge, "edg"),
            Mod::new("e_toxin_resistant", "Toxin Resistant", ModCategory::Edge, "edg"),
            Mod::new("t_tinkerer", "Tinkerer", ModCategory::Trait, "trt"),
            Mod::new("sk_athletics_1", "Athletics 1", ModCategory::Skill, "skl"),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_miss_is_none() {
        let catalog = sample();
        assert!(catalog.lookup("e_does_not_exist").is_none());
        assert_eq!(catalog.lookup("e_tough").unwrap().name, "Tough");
    }

    #[test]
    fn search_combines_filters() {
        let catalog = sample();
        let edges = catalog.search(&ModQuery::new().category(ModCategory::Edge));
        assert_eq!(edges.len(), 2);

        let prefixed = catalog.search(&ModQuery::new().name_prefix("to"));
        assert_eq!(prefixed.len(), 2);

        let narrowed = catalog.search(
            &ModQuery::new()
                .category(ModCategory::Edge)
                .kind("edg")
                .name_prefix("Toxin"),
        );
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].id, "e_toxin_resistant");

        assert!(catalog.search(&ModQuery::new().kind("zzz")).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = StaticCatalog::new([
            Mod::new("e_tough", "Tough", ModCategory::Edge, "edg"),
            Mod::new("e_tough", "Tough Again", ModCategory::Edge, "edg"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateMod("e_tough".into())
        );
    }

    #[test]
    fn unknown_effect_attributes_are_reported() {
        let catalog = StaticCatalog::new([Mod::new("e_odd", "Odd", ModCategory::Edge, "edg")
            .with_int("physical", 1)
            .with_effect("not_a_stat", EffectValue::Flag(true))])
        .unwrap();
        let unknown = catalog.unknown_attributes(Schema::standard());
        assert_eq!(unknown, vec![("e_odd".to_string(), "not_a_stat".to_string())]);
    }
}
