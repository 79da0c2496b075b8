//! The derivation pass run at the end of every rebuild.
//!
//! Each step reads values derived by the replay or by earlier steps and
//! writes others, so the order below is part of the contract. No step fails:
//! inconsistencies (injury or language counts that do not add up, an unknown
//! social class) become warning notes on the live sheet and are never
//! corrected automatically.
mod augment;
mod bookkeeping;
mod lifestyle;
mod thresholds;

pub use lifestyle::{LifestyleRung, SocialClass, lifestyle_for, res_inf_tier};
pub use thresholds::{initiative_for, mook_threshold, wound_threshold};

use crate::engine::SheetEngine;
use crate::sheet::{CharacterRecord, LiveSheet};

/// Runs every housekeeping step in order.
pub fn run(engine: &SheetEngine<'_>, character: &mut CharacterRecord, live: &mut LiveSheet) {
    augment::sliverware_sets(engine, character, live);
    thresholds::wyld_cancer(engine, character, live);
    lifestyle::select(engine, character, live);
    augment::masteries(engine, character, live);
    thresholds::skill_floors(engine, live);
    thresholds::initiative(live);
    thresholds::wound_thresholds(engine, live);
    thresholds::armour_caps(engine, live);
    bookkeeping::languages(engine, live);
    bookkeeping::secondary_info(character, live);
    bookkeeping::custom_notes(character, live);
    bookkeeping::talent_points(character, live);
}
