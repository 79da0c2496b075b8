//! Languages, secondary info, saved notes and talent point totals.

use serde_json::Value;

use crate::engine::SheetEngine;
use crate::sheet::{CharacterRecord, LiveSheet, NoteKind};

pub(super) fn languages(engine: &SheetEngine<'_>, live: &mut LiveSheet) {
    let allowed = engine
        .rules()
        .base_languages
        .saturating_add(live.int("bonus_languages"));
    let known = i32::try_from(live.list("languages").len()).unwrap_or(i32::MAX);
    let (kind, note) = match known.cmp(&allowed) {
        std::cmp::Ordering::Less => (
            NoteKind::Warnings,
            format!(
                "Knows {known} languages, may learn {}",
                allowed.saturating_sub(known)
            ),
        ),
        std::cmp::Ordering::Greater => (
            NoteKind::Warnings,
            format!(
                "Knows {known} languages, {} more than allowed",
                known.saturating_sub(allowed)
            ),
        ),
        std::cmp::Ordering::Equal => (NoteKind::Info, format!("Knows all {allowed} languages")),
    };
    live.note(kind, note);
}

/// Copies the opaque secondary data across and renders object fields as
/// notes.
pub(super) fn secondary_info(character: &CharacterRecord, live: &mut LiveSheet) {
    let secondary = character.secondary.clone();
    live.set_int(
        "reputation",
        i32::try_from(secondary.reputation).unwrap_or(if secondary.reputation < 0 {
            i32::MIN
        } else {
            i32::MAX
        }),
    );
    for (kind, value) in [
        (NoteKind::Weapons, &secondary.weapons),
        (NoteKind::Gear, &secondary.gear),
        (NoteKind::Contacts, &secondary.contacts),
        (NoteKind::Missions, &secondary.missions),
        (NoteKind::Commendations, &secondary.commendations),
        (NoteKind::Reprimands, &secondary.reprimands),
    ] {
        for line in render(value) {
            live.note(kind, line);
        }
    }
    live.secondary = secondary;
}

fn render(value: &Value) -> Vec<String> {
    match value {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, field)| format!("{key}: {}", scalar(field)))
            .collect(),
        Value::Array(items) => items.iter().map(scalar).collect(),
        _ => Vec::new(),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub(super) fn custom_notes(character: &CharacterRecord, live: &mut LiveSheet) {
    for (kind, notes) in &character.custom_notes {
        for note in notes {
            if !live.notes(*kind).contains(note) {
                live.note(*kind, note.clone());
            }
        }
    }
}

/// `total = create + bonus + missions - breed_bonus`. `unspent` moves by the
/// change in total, so points already spent stay spent.
pub(super) fn talent_points(character: &mut CharacterRecord, live: &mut LiveSheet) {
    let talent = &mut character.talent;
    let total = talent
        .create
        .saturating_add(talent.bonus)
        .saturating_add(talent.missions)
        .saturating_sub(talent.breed_bonus);
    talent.unspent = talent.unspent.saturating_add(total.saturating_sub(talent.total));
    talent.total = total;

    live.set_int("tp_total", talent.total);
    live.set_int("tp_spent", talent.spent);
    live.set_int("tp_unspent", talent.unspent);
}
