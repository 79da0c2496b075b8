//! The raw character record: the single source of truth for selections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::NoteKind;
use crate::breed::Breed;
use crate::graph::NodeGraph;

pub type CharacterId = i64;
pub type PlayerId = i64;

/// Who controls the character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CharacterKind {
    #[default]
    Player,
    NonPlayer,
}

/// Every graph location mapped to a mod id, or to `""` when empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeMap(BTreeMap<String, String>);

impl NodeMap {
    /// One empty entry per location in `graph`.
    pub fn for_graph(graph: &NodeGraph) -> Self {
        Self(
            graph
                .nodes()
                .map(|node| (node.location_id.clone(), String::new()))
                .collect(),
        )
    }

    /// The filled mod id at `location`, if any.
    pub fn get(&self, location: &str) -> Option<&str> {
        self.0
            .get(location)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.0.contains_key(location)
    }

    pub fn set(&mut self, location: impl Into<String>, mod_id: impl Into<String>) {
        self.0.insert(location.into(), mod_id.into());
    }

    /// Empties `location`, returning the mod id it held.
    pub fn clear(&mut self, location: &str) -> Option<String> {
        let slot = self.0.get_mut(location)?;
        let previous = std::mem::take(slot);
        (!previous.is_empty()).then_some(previous)
    }

    /// Filled `(location, mod_id)` pairs.
    pub fn filled(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, id)| !id.is_empty())
            .map(|(location, id)| (location.as_str(), id.as_str()))
    }

    /// Every filled mod id; a mod in two slots appears twice.
    pub fn mod_ids(&self) -> Vec<&str> {
        self.filled().map(|(_, id)| id).collect()
    }

    pub fn count(&self, mod_id: &str) -> usize {
        self.filled().filter(|(_, id)| *id == mod_id).count()
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Adds any location of `graph` missing from the map.
    pub fn extend_for_graph(&mut self, graph: &NodeGraph) {
        for node in graph.nodes() {
            self.0.entry(node.location_id.clone()).or_default();
        }
    }
}

/// Talent point ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentPoints {
    pub total: i32,
    pub spent: i32,
    pub unspent: i32,
    pub create: i32,
    pub missions: i32,
    pub bonus: i32,
    /// Points the breed costs, deducted from `total`.
    pub breed_bonus: i32,
}

/// Opaque secondary data passed through to the live sheet untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryInfo {
    pub weapons: serde_json::Value,
    pub gear: serde_json::Value,
    pub contacts: serde_json::Value,
    pub missions: serde_json::Value,
    pub commendations: serde_json::Value,
    pub reprimands: serde_json::Value,
    pub reputation: i64,
}

/// A character as persisted: identity, selections and bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub archetype: String,
    pub player_id: PlayerId,
    #[serde(default)]
    pub kind: CharacterKind,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub breed: Option<Breed>,
    #[serde(default)]
    pub talent: TalentPoints,
    pub nodes: NodeMap,
    /// `location -> mod_id -> player text`.
    #[serde(default)]
    pub text_replace_mods: BTreeMap<String, BTreeMap<String, String>>,
    /// Mods placed under a GM override; rebuilds never re-validate them.
    #[serde(default)]
    pub stored_overrides: Vec<String>,
    #[serde(default)]
    pub custom_notes: BTreeMap<NoteKind, Vec<String>>,
    #[serde(default)]
    pub secondary: SecondaryInfo,
}

impl CharacterRecord {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        player_id: PlayerId,
        graph: &NodeGraph,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            archetype: String::new(),
            player_id,
            kind: CharacterKind::Player,
            deleted: false,
            created_at: now,
            modified_at: now,
            breed: None,
            talent: TalentPoints::default(),
            nodes: NodeMap::for_graph(graph),
            text_replace_mods: BTreeMap::new(),
            stored_overrides: Vec::new(),
            custom_notes: BTreeMap::new(),
            secondary: SecondaryInfo::default(),
        }
    }

    #[must_use]
    pub fn with_creation_points(mut self, points: i32) -> Self {
        self.talent.create = points;
        self
    }

    #[must_use]
    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = archetype.into();
        self
    }

    /// Free text stored for `mod_id` at `location`.
    pub fn text_for(&self, location: &str, mod_id: &str) -> Option<&str> {
        self.text_replace_mods
            .get(location)
            .and_then(|texts| texts.get(mod_id))
            .map(String::as_str)
    }

    pub fn store_text(&mut self, location: &str, mod_id: &str, text: impl Into<String>) {
        self.text_replace_mods
            .entry(location.to_string())
            .or_default()
            .insert(mod_id.to_string(), text.into());
    }

    pub fn discard_text(&mut self, location: &str, mod_id: &str) {
        if let Some(texts) = self.text_replace_mods.get_mut(location) {
            texts.remove(mod_id);
            if texts.is_empty() {
                self.text_replace_mods.remove(location);
            }
        }
    }

    pub fn is_override(&self, mod_id: &str) -> bool {
        self.stored_overrides.iter().any(|id| id == mod_id)
    }

    pub fn add_custom_note(&mut self, kind: NoteKind, note: impl Into<String>) {
        self.custom_notes.entry(kind).or_default().push(note.into());
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

/// A player account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub deleted: bool,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            real_name: String::new(),
            email: String::new(),
            deleted: false,
        }
    }
}
