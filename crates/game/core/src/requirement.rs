//! Prerequisite and restriction evaluation.
//!
//! Both lists share one shape with opposite polarity. A list carrying the
//! `"null"` sentinel (or no ids at all) always passes. A single-element list
//! is a plain membership test whatever its mode. Longer lists:
//!
//! | list         | mode | passes when                          |
//! |--------------|------|--------------------------------------|
//! | prerequisite | Any  | at least one id is present           |
//! | prerequisite | All  | every id is present                  |
//! | restriction  | Any  | no id is present                     |
//! | restriction  | All  | at least one id is missing           |
//!
//! So an `All` restriction of two or more ids only blocks a character that
//! already has the complete set.

use crate::catalog::{Mod, Requirement, RequirementMode};

/// Outcome of [`evaluate`]. A mod is placeable only if both hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub prerequisites: bool,
    pub restrictions: bool,
}

impl Verdict {
    pub const fn passes(self) -> bool {
        self.prerequisites && self.restrictions
    }
}

/// Checks `candidate` against the mods currently on the character.
///
/// `present` may hold duplicates; order is irrelevant. Never fails.
pub fn evaluate(candidate: &Mod, present: &[&str]) -> Verdict {
    Verdict {
        prerequisites: prerequisites_met(&candidate.prerequisites, present),
        restrictions: restrictions_met(&candidate.restrictions, present),
    }
}

fn has(present: &[&str], id: &str) -> bool {
    present.contains(&id)
}

fn prerequisites_met(requirement: &Requirement, present: &[&str]) -> bool {
    if requirement.is_null() {
        return true;
    }
    match (requirement.mode, requirement.ids.as_slice()) {
        (_, [single]) => has(present, single),
        (RequirementMode::Any, ids) => ids.iter().any(|id| has(present, id)),
        (RequirementMode::All, ids) => ids.iter().all(|id| has(present, id)),
    }
}

fn restrictions_met(requirement: &Requirement, present: &[&str]) -> bool {
    if requirement.is_null() {
        return true;
    }
    match (requirement.mode, requirement.ids.as_slice()) {
        (_, [single]) => !has(present, single),
        (RequirementMode::Any, ids) => !ids.iter().any(|id| has(present, id)),
        (RequirementMode::All, ids) => !ids.iter().all(|id| has(present, id)),
    }
}
