//! Placement checks run before a mod is written through the normal path.

use super::{ApplyFlags, SheetEngine};
use crate::catalog::Mod;
use crate::error::Refusal;
use crate::graph::Node;
use crate::requirement;
use crate::sheet::CharacterRecord;

/// Rule checks in order: requirements, copies, placement, talent points.
///
/// The mod currently at `node` is left out of the character's mod set, since
/// it is about to be replaced.
pub(super) fn check_placement(
    engine: &SheetEngine<'_>,
    character: &CharacterRecord,
    candidate: &Mod,
    node: &Node,
    flags: ApplyFlags,
) -> Result<(), Refusal> {
    if !flags.contains(ApplyFlags::IGNORE_PREREQS) {
        let present: Vec<&str> = character
            .nodes
            .filled()
            .filter(|(location, _)| *location != node.location_id)
            .map(|(_, mod_id)| mod_id)
            .collect();

        let verdict = requirement::evaluate(candidate, &present);
        if !verdict.prerequisites {
            return Err(Refusal::PrerequisitesUnmet(candidate.id.clone()));
        }
        if !verdict.restrictions {
            return Err(Refusal::Restricted(candidate.id.clone()));
        }
        if !candidate.allow_multiple_copies && present.contains(&candidate.id.as_str()) {
            return Err(Refusal::DuplicateCopy(candidate.id.clone()));
        }
    }

    if !engine.graph().is_allowed(candidate, &node.location_id) {
        return Err(Refusal::NotAllowed {
            mod_id: candidate.id.clone(),
            location: node.location_id.clone(),
        });
    }

    // The occupant's cost comes back when it is replaced.
    let refund = character
        .nodes
        .get(&node.location_id)
        .filter(|existing| {
            !character.is_override(existing)
                && !engine.is_breed_locked(character, &node.location_id, existing)
        })
        .and_then(|existing| engine.catalog().lookup(existing))
        .map_or(0, |existing| existing.talent_cost);
    let cost = if engine.is_breed_locked(character, &node.location_id, &candidate.id) {
        0
    } else {
        candidate.talent_cost
    };
    let available = character.talent.unspent + refund;
    if cost > available {
        return Err(Refusal::InsufficientTalentPoints {
            mod_id: candidate.id.clone(),
            needed: cost,
            available,
        });
    }

    Ok(())
}
