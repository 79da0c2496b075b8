//! Folding a mod's effects into a live sheet.

use strum::IntoEnumIterator;
use tracing::warn;

use super::SheetEngine;
use crate::catalog::{EffectValue, Mod, ModCategory, TEXT_PLACEHOLDER};
use crate::schema::{AttrValue, CombinePolicy, SliverwareSet};
use crate::sheet::{AppliedMod, CharacterRecord, LiveSheet, NoteKind};

/// Separator between appended text clauses.
const CLAUSE_SEPARATOR: &str = "; ";

impl SheetEngine<'_> {
    /// Applies `applied`'s effects, placed at `location`, to `live`.
    ///
    /// At most once per sheet: single-copy mods are keyed by id, multi-copy
    /// mods by id and location. Returns `false` when the key was already
    /// recorded and nothing changed.
    pub fn apply_effects(
        &self,
        character: &CharacterRecord,
        live: &mut LiveSheet,
        applied: &Mod,
        location: &str,
    ) -> bool {
        let key = AppliedMod {
            mod_id: applied.id.clone(),
            location: applied
                .allow_multiple_copies
                .then(|| location.to_string()),
        };
        if live.has_applied(&key) {
            return false;
        }
        live.applied_mods.push(key);

        let stored_text = character.text_for(location, &applied.id).unwrap_or("");
        for (attribute, effect) in &applied.effects {
            if self.schema.is_protected(attribute) {
                continue;
            }
            let value = resolve(character, effect, stored_text);
            self.combine(live, applied, attribute, value);
        }
        for attribute in &applied.skills_touched {
            live.touch(attribute, &applied.name);
        }

        if applied.category == ModCategory::Sliverware
            && let Some(set) = SliverwareSet::iter().find(|set| set.kind() == applied.kind)
        {
            let counter = set.count_attribute();
            live.set_int(counter.clone(), live.int(&counter) + 1);
        }

        let bucket = match applied.category {
            ModCategory::Edge => Some(NoteKind::Edges),
            ModCategory::Trait => Some(NoteKind::Traits),
            ModCategory::Sliverware => Some(NoteKind::Sliverware),
            _ => None,
        };
        if let Some(bucket) = bucket {
            live.note(bucket, note_line(applied, stored_text));
        }
        if applied.choose_text && stored_text.is_empty() {
            live.note(
                NoteKind::Info,
                format!("{} at {location} is waiting for text", applied.name),
            );
        }
        true
    }

    fn combine(&self, live: &mut LiveSheet, applied: &Mod, attribute: &str, value: AttrValue) {
        let Some(spec) = self.schema.get(attribute) else {
            warn!(
                target: "sheet::engine",
                mod_id = %applied.id,
                attribute,
                "effect targets an unknown attribute"
            );
            live.note(
                NoteKind::Warnings,
                format!("{} affects unknown attribute {attribute}", applied.name),
            );
            return;
        };

        let combined = match (spec.policy, value) {
            (CombinePolicy::Accumulate, AttrValue::Int(delta)) => {
                self.accumulate(live, attribute, delta);
                None
            }
            (CombinePolicy::Replace, value)
                if std::mem::discriminant(&value) == std::mem::discriminant(&spec.default) =>
            {
                Some(value)
            }
            (CombinePolicy::AppendText, AttrValue::Text(text)) => {
                let current = live.text(attribute);
                Some(AttrValue::Text(if current.is_empty() {
                    text
                } else {
                    format!("{current}{CLAUSE_SEPARATOR}{text}")
                }))
            }
            (CombinePolicy::BooleanOr, AttrValue::Flag(flag)) => {
                Some(AttrValue::Flag(live.flag(attribute) || flag))
            }
            (CombinePolicy::ListAppend, AttrValue::List(items)) => {
                let mut list = live.list(attribute).to_vec();
                list.extend(items);
                Some(AttrValue::List(list))
            }
            (CombinePolicy::ListAppend, AttrValue::Text(item)) => {
                let mut list = live.list(attribute).to_vec();
                list.push(item);
                Some(AttrValue::List(list))
            }
            (policy, value) => {
                live.note(
                    NoteKind::Warnings,
                    format!(
                        "{} gives {attribute} a {} value, expected {policy:?}",
                        applied.name,
                        value.type_name()
                    ),
                );
                return;
            }
        };
        if let Some(value) = combined {
            live.set(attribute, value);
        }
        live.touch(attribute, &applied.name);
    }

    /// Adds `delta` to an integer attribute, routing clamped attributes
    /// through their `_actual` shadow.
    pub(crate) fn accumulate(&self, live: &mut LiveSheet, attribute: &str, delta: i32) {
        match self.schema.get(attribute).and_then(|spec| spec.clamp) {
            Some(clamp) => {
                let actual = live.actual(attribute).saturating_add(delta);
                live.set_actual(attribute, actual);
                live.set_int(attribute, clamp.apply(actual));
            }
            None => live.set_int(attribute, live.int(attribute).saturating_add(delta)),
        }
    }
}

fn resolve(character: &CharacterRecord, effect: &EffectValue, stored_text: &str) -> AttrValue {
    match effect {
        EffectValue::Int(delta) => AttrValue::Int(*delta),
        EffectValue::Flag(flag) => AttrValue::Flag(*flag),
        EffectValue::Text(text) => AttrValue::Text(text.replace(TEXT_PLACEHOLDER, stored_text)),
        EffectValue::List(items) => AttrValue::List(
            items
                .iter()
                .map(|item| item.replace(TEXT_PLACEHOLDER, stored_text))
                .collect(),
        ),
        EffectValue::TextFrom { location, mod_id } => AttrValue::Text(
            character
                .text_for(location, mod_id)
                .unwrap_or_default()
                .to_string(),
        ),
    }
}

fn note_line(applied: &Mod, stored_text: &str) -> String {
    match (stored_text.is_empty(), applied.description.is_empty()) {
        (false, _) => format!("{} ({stored_text})", applied.name),
        (true, false) => format!("{}: {}", applied.name, applied.description),
        (true, true) => applied.name.clone(),
    }
}
