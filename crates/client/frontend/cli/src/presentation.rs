//! Plain-text rendering of sheets, players and mods.

use std::fmt::Write as _;

use sheet_core::schema::{ArmourTrack, PRIMARY_SKILLS, TRAINED_SKILLS, WoundTrack};
use sheet_core::{CharacterRecord, LiveSheet, Mod, NoteKind, PlayerRecord};
use strum::IntoEnumIterator;

pub fn player_line(player: &PlayerRecord) -> String {
    format!("  #{} {}", player.id, player.name)
}

pub fn character_line(character: &CharacterRecord) -> String {
    let breed = character
        .breed
        .map_or_else(|| "no breed".to_string(), |breed| breed.to_string());
    format!(
        "  #{} {} ({breed}, player #{})",
        character.id, character.name, character.player_id
    )
}

pub fn mod_line(candidate: &Mod) -> String {
    let mut line = format!(
        "  {:<24} {} [{}/{}]",
        candidate.id, candidate.name, candidate.category, candidate.kind
    );
    if candidate.talent_cost != 0 {
        let _ = write!(line, " cost {}", candidate.talent_cost);
    }
    if candidate.choose_text {
        line.push_str(" (asks for text)");
    }
    line
}

/// Renders the derived sheet, section by section.
pub fn render_sheet(character: &CharacterRecord, live: &LiveSheet) -> String {
    let mut out = String::new();
    let breed = live.text("breed");
    let _ = writeln!(
        out,
        "== {} ==  {}",
        character.name,
        if breed.is_empty() { "(no breed)" } else { breed }
    );
    for (label, attribute) in [
        ("Culture", "culture"),
        ("Citizenship", "citizenship"),
        ("Social class", "social_class"),
        ("Lifestyle", "lifestyle"),
    ] {
        let value = live.text(attribute);
        if !value.is_empty() {
            let _ = writeln!(out, "{label}: {value}");
        }
    }

    out.push_str("\nSkills\n");
    for primary in PRIMARY_SKILLS {
        let _ = writeln!(out, "  {primary:<12} {}", live.int(primary));
        for (skill, _) in TRAINED_SKILLS.iter().filter(|(_, parent)| *parent == primary) {
            let rank = live.int(skill);
            if rank != 0 {
                let _ = writeln!(out, "    {skill:<12} {rank}");
            }
        }
    }

    out.push_str("\nThresholds\n");
    for track in WoundTrack::iter() {
        let _ = writeln!(out, "  {:<12} {}", track.to_string(), live.int(track.threshold()));
    }
    let _ = writeln!(out, "  {:<12} {}", "Mook", live.int("mook_wt"));
    let _ = writeln!(out, "  {:<12} {}", "Initiative", live.int("initiative"));

    let armour: Vec<String> = ArmourTrack::iter()
        .filter(|track| live.int(track.attribute()) != 0)
        .map(|track| format!("{track} {}", live.int(track.attribute())))
        .collect();
    if !armour.is_empty() {
        let _ = writeln!(out, "\nArmour: {}", armour.join(", "));
    }

    let languages = live.list("languages");
    if !languages.is_empty() {
        let _ = writeln!(out, "Languages: {}", languages.join(", "));
    }
    let _ = writeln!(
        out,
        "Talent points: {} total, {} spent, {} unspent",
        live.int("tp_total"),
        live.int("tp_spent"),
        live.int("tp_unspent")
    );

    for kind in NoteKind::iter() {
        let notes = live.notes(kind);
        if notes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", title(kind));
        for note in notes {
            let _ = writeln!(out, "  - {note}");
        }
    }
    out
}

fn title(kind: NoteKind) -> String {
    let name = kind.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::{ModCategory, NodeGraph, Schema};

    use super::*;

    #[test]
    fn sheet_lists_notes_and_skills() {
        let character = CharacterRecord::new(1, "Brick", 1, NodeGraph::standard());
        let mut live = LiveSheet::new(Schema::standard(), &character);
        live.set_text("breed", "Hulk");
        live.set_int("athletics", 2);
        live.note(NoteKind::Warnings, "Knows 1 languages, may learn 1");

        let text = render_sheet(&character, &live);
        assert!(text.starts_with("== Brick ==  Hulk"));
        assert!(text.contains("    athletics    2"));
        assert!(!text.contains("melee"));
        assert!(text.contains("Warnings\n  - Knows 1 languages, may learn 1"));
    }

    #[test]
    fn mod_lines_mention_cost_and_text() {
        let candidate = sheet_core::Mod::new("t_nemesis", "Nemesis", ModCategory::Trait, "trt")
            .with_cost(2)
            .choosing_text();
        let line = mod_line(&candidate);
        assert!(line.contains("[trait/trt] cost 2 (asks for text)"));
    }
}
