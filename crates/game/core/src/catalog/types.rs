//! Catalog record types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Sentinel id meaning "no requirement declared".
pub const NULL_REQUIREMENT: &str = "null";

/// Placeholder substituted with the player's free text in text effects.
pub const TEXT_PLACEHOLDER: &str = "%TEXT%";

/// Top-level grouping of mods. A node only accepts mods of its own category.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModCategory {
    Breed,
    Citizen,
    Culture,
    Language,
    Disciple,
    Edge,
    Injury,
    Lifestyle,
    Social,
    Skill,
    Opportunity,
    Slot,
    Organisation,
    Rank,
    Sliverware,
    Trait,
    Name,
    Soulweaving,
    Wound,
}

/// How a requirement list is matched against the character's mods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementMode {
    #[default]
    Any,
    All,
}

/// A prerequisite or restriction list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub ids: Vec<String>,
    #[serde(default)]
    pub mode: RequirementMode,
}

impl Requirement {
    /// The "null" requirement, always satisfied.
    pub fn none() -> Self {
        Self {
            ids: vec![NULL_REQUIREMENT.to_string()],
            mode: RequirementMode::Any,
        }
    }

    pub fn any<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            mode: RequirementMode::Any,
        }
    }

    pub fn all<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            mode: RequirementMode::All,
        }
    }

    /// True when nothing is required: an empty list or one carrying the
    /// `"null"` sentinel.
    pub fn is_null(&self) -> bool {
        self.ids.is_empty() || self.ids.iter().any(|id| id == NULL_REQUIREMENT)
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::none()
    }
}

/// The value side of an effect entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectValue {
    Int(i32),
    Text(String),
    Flag(bool),
    List(Vec<String>),
    /// Copies the free text the player stored for `mod_id` at `location`.
    TextFrom { location: String, mod_id: String },
}

/// Marks a mod as a specialisation mastery over another skill mod.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterySpec {
    /// Mod id of the skill whose effects are multiplied.
    pub skill: String,
    pub rank: i32,
}

/// A catalog-defined game element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mod {
    pub id: String,
    pub name: String,
    pub category: ModCategory,
    /// Short type code (`"skl"`, `"edg"`, `"sw_ocular"`, ...).
    pub kind: String,
    #[serde(default)]
    pub prerequisites: Requirement,
    #[serde(default)]
    pub restrictions: Requirement,
    #[serde(default)]
    pub allow_multiple_copies: bool,
    #[serde(default)]
    pub effects: BTreeMap<String, EffectValue>,
    #[serde(default)]
    pub skills_touched: Vec<String>,
    #[serde(default)]
    pub choose_text: bool,
    #[serde(default)]
    pub talent_cost: i32,
    #[serde(default)]
    pub mastery: Option<MasterySpec>,
    #[serde(default)]
    pub description: String,
}

impl Mod {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ModCategory,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            kind: kind.into(),
            prerequisites: Requirement::none(),
            restrictions: Requirement::none(),
            allow_multiple_copies: false,
            effects: BTreeMap::new(),
            skills_touched: Vec::new(),
            choose_text: false,
            talent_cost: 0,
            mastery: None,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_effect(mut self, attribute: impl Into<String>, value: EffectValue) -> Self {
        self.effects.insert(attribute.into(), value);
        self
    }

    #[must_use]
    pub fn with_int(self, attribute: impl Into<String>, delta: i32) -> Self {
        self.with_effect(attribute, EffectValue::Int(delta))
    }

    #[must_use]
    pub fn with_prerequisites(mut self, requirement: Requirement) -> Self {
        self.prerequisites = requirement;
        self
    }

    #[must_use]
    pub fn with_restrictions(mut self, requirement: Requirement) -> Self {
        self.restrictions = requirement;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, talent_cost: i32) -> Self {
        self.talent_cost = talent_cost;
        self
    }

    #[must_use]
    pub fn with_mastery(mut self, skill: impl Into<String>, rank: i32) -> Self {
        self.mastery = Some(MasterySpec {
            skill: skill.into(),
            rank,
        });
        self
    }

    #[must_use]
    pub fn with_touched(mut self, attribute: impl Into<String>) -> Self {
        self.skills_touched.push(attribute.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.allow_multiple_copies = true;
        self
    }

    #[must_use]
    pub fn choosing_text(mut self) -> Self {
        self.choose_text = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn categories_round_trip_through_strum_and_serde() {
        assert_eq!(ModCategory::from_str("sliverware"), Ok(ModCategory::Sliverware));
        assert_eq!(ModCategory::Soulweaving.to_string(), "soulweaving");
        let json = serde_json::to_string(&ModCategory::Edge).unwrap();
        assert_eq!(json, "\"edge\"");
    }

    #[test]
    fn null_requirement_is_detected() {
        assert!(Requirement::none().is_null());
        assert!(Requirement::all(Vec::<String>::new()).is_null());
        assert!(Requirement::any(["e_tough", "null"]).is_null());
        assert!(!Requirement::any(["e_tough"]).is_null());
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let json = r#"{"id":"e_tough","name":"Tough","category":"edge","kind":"edg"}"#;
        let parsed: Mod = serde_json::from_str(json).unwrap();
        assert!(parsed.prerequisites.is_null());
        assert!(parsed.effects.is_empty());
        assert_eq!(parsed.talent_cost, 0);
        assert!(parsed.mastery.is_none());
    }
}
