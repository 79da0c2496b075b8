//! The derived ("live") character sheet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::{CharacterId, CharacterRecord, SecondaryInfo};
use crate::schema::{AttrValue, AttributeSpec, Schema};

/// Note buckets on the live sheet.
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
pub enum NoteKind {
    Edges,
    Traits,
    Sliverware,
    Warnings,
    Info,
    Weapons,
    Gear,
    Contacts,
    Missions,
    Commendations,
    Reprimands,
    General,
}

/// Idempotency key for one effect application.
///
/// Single-copy mods are keyed by id alone; multi-copy mods also carry the
/// location so each copy counts once.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppliedMod {
    pub mod_id: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Fully derived character sheet, regenerable from a [`CharacterRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveSheet {
    pub character_id: CharacterId,
    pub name: String,
    pub values: BTreeMap<String, AttrValue>,
    /// True totals of clamped attributes.
    pub actual: BTreeMap<String, i32>,
    /// `<attr>_touched_by`: names of the mods that wrote each attribute.
    pub touched_by: BTreeMap<String, String>,
    pub applied_mods: Vec<AppliedMod>,
    pub notes: BTreeMap<NoteKind, Vec<String>>,
    #[serde(default)]
    pub secondary: SecondaryInfo,
}

impl LiveSheet {
    /// A blank sheet holding every schema default.
    pub fn new(schema: &Schema, character: &CharacterRecord) -> Self {
        let mut sheet = Self {
            character_id: character.id,
            name: character.name.clone(),
            values: BTreeMap::new(),
            actual: BTreeMap::new(),
            touched_by: BTreeMap::new(),
            applied_mods: Vec::new(),
            notes: BTreeMap::new(),
            secondary: SecondaryInfo::default(),
        };
        for spec in schema.iter() {
            sheet.reset(spec);
        }
        sheet
    }

    fn reset(&mut self, spec: &AttributeSpec) {
        match (&spec.default, spec.clamp) {
            (AttrValue::Int(default), Some(clamp)) => {
                self.actual.insert(spec.name.clone(), *default);
                self.values
                    .insert(spec.name.clone(), AttrValue::Int(clamp.apply(*default)));
            }
            (default, _) => {
                self.values.insert(spec.name.clone(), default.clone());
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    /// Public integer value; `0` for missing or non-integer attributes.
    pub fn int(&self, name: &str) -> i32 {
        match self.values.get(name) {
            Some(AttrValue::Int(value)) => *value,
            _ => 0,
        }
    }

    /// Unclamped total for clamped attributes, the public value otherwise.
    pub fn actual(&self, name: &str) -> i32 {
        self.actual
            .get(name)
            .copied()
            .unwrap_or_else(|| self.int(name))
    }

    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(AttrValue::Text(value)) => value,
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(AttrValue::Flag(true)))
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(AttrValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: AttrValue) {
        self.values.insert(name.into(), value);
    }

    pub fn set_int(&mut self, name: impl Into<String>, value: i32) {
        self.set(name, AttrValue::Int(value));
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, AttrValue::Text(value.into()));
    }

    pub fn set_actual(&mut self, name: impl Into<String>, value: i32) {
        self.actual.insert(name.into(), value);
    }

    /// Appends `by` to the attribute's touched-by audit string.
    pub fn touch(&mut self, attribute: &str, by: &str) {
        let audit = self.touched_by.entry(attribute.to_string()).or_default();
        if audit.split(", ").any(|name| name == by) {
            return;
        }
        if !audit.is_empty() {
            audit.push_str(", ");
        }
        audit.push_str(by);
    }

    pub fn touched_by(&self, attribute: &str) -> Option<&str> {
        self.touched_by.get(attribute).map(String::as_str)
    }

    pub fn note(&mut self, kind: NoteKind, text: impl Into<String>) {
        self.notes.entry(kind).or_default().push(text.into());
    }

    pub fn notes(&self, kind: NoteKind) -> &[String] {
        self.notes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_applied(&self, key: &AppliedMod) -> bool {
        self.applied_mods.contains(key)
    }
}
