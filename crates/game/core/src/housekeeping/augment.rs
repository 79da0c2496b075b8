//! Sliverware set completion and specialisation masteries.

use strum::IntoEnumIterator;
use tracing::debug;

use crate::catalog::EffectValue;
use crate::engine::SheetEngine;
use crate::schema::SliverwareSet;
use crate::sheet::{AppliedMod, CharacterRecord, LiveSheet};

/// Grants each set's completion mod once its implant count passes the set
/// size, and clears the completion node otherwise.
pub(super) fn sliverware_sets(
    engine: &SheetEngine<'_>,
    character: &mut CharacterRecord,
    live: &mut LiveSheet,
) {
    let set_size = engine.rules().sliverware_set_size;
    for set in SliverwareSet::iter() {
        let location = set.complete_location();
        if !engine.graph().contains(&location) {
            continue;
        }
        if live.int(&set.count_attribute()) > set_size {
            if engine.force_apply(character, live, &set.complete_mod(), &location) {
                debug!(target: "sheet::housekeeping", %set, "sliverware set complete");
            }
        } else {
            character.nodes.clear(&location);
        }
    }
}

/// Adds `rank - 1` to every attribute the mastered skill touches.
///
/// The skill is the mod named by the mastery's [`MasterySpec`]; it must be on
/// the character for the bonus to count. Attributes come from the skill's
/// `skills_touched`, falling back to its integer effects.
///
/// [`MasterySpec`]: crate::catalog::MasterySpec
pub(super) fn masteries(
    engine: &SheetEngine<'_>,
    character: &CharacterRecord,
    live: &mut LiveSheet,
) {
    for slot in 0..engine.rules().mastery_slots {
        let location = format!("mastery_n{slot}");
        let Some(mastery) = character
            .nodes
            .get(&location)
            .and_then(|mod_id| engine.catalog().lookup(mod_id))
        else {
            continue;
        };
        let Some(spec) = &mastery.mastery else {
            continue;
        };
        let bonus = spec.rank - 1;
        if bonus <= 0 || character.nodes.count(&spec.skill) == 0 {
            continue;
        }
        let Some(skill) = engine.catalog().lookup(&spec.skill) else {
            continue;
        };

        let key = AppliedMod {
            mod_id: format!("mastery:{}", mastery.id),
            location: Some(location),
        };
        if live.has_applied(&key) {
            continue;
        }
        live.applied_mods.push(key);

        let touched: Vec<&str> = if skill.skills_touched.is_empty() {
            skill
                .effects
                .iter()
                .filter(|(_, effect)| matches!(effect, EffectValue::Int(_)))
                .map(|(attribute, _)| attribute.as_str())
                .collect()
        } else {
            skill.skills_touched.iter().map(String::as_str).collect()
        };
        for attribute in touched {
            if engine.schema().get(attribute).is_none() {
                continue;
            }
            engine.accumulate(live, attribute, bonus);
            live.touch(attribute, &mastery.name);
        }
    }
}
