//! Wyld Cancer, skill floors, initiative, wound thresholds and armour caps.

use strum::IntoEnumIterator;
use tracing::warn;

use crate::catalog::ModCategory;
use crate::engine::SheetEngine;
use crate::schema::{Clamp, FLOOR_ONE_SKILLS, WoundTrack};
use crate::sheet::{CharacterRecord, LiveSheet, NoteKind};

/// `total = wyld_cancer * multiplier + extra`; compares the injuries that
/// total calls for with the filled injury nodes.
pub(super) fn wyld_cancer(
    engine: &SheetEngine<'_>,
    character: &CharacterRecord,
    live: &mut LiveSheet,
) {
    let rules = engine.rules();
    let total = live
        .int("wyld_cancer")
        .saturating_mul(live.int("wyld_cancer_multiplier"))
        .saturating_add(live.int("wyld_cancer_extra"));
    let expected = if rules.wyld_cancer_injury_threshold <= 0
        || total < rules.wyld_cancer_injury_threshold
    {
        0
    } else {
        (total / rules.wyld_cancer_injury_threshold).min(rules.max_permanent_injuries)
    };
    live.set_int("wyld_cancer_total", total);
    live.set_int("permanent_injuries_expected", expected);

    let recorded = engine
        .graph()
        .by_category(ModCategory::Injury)
        .filter(|node| character.nodes.get(&node.location_id).is_some())
        .count();
    let recorded = i32::try_from(recorded).unwrap_or(i32::MAX);
    if recorded != expected {
        warn!(
            target: "sheet::housekeeping",
            character = character.id,
            total,
            expected,
            recorded,
            "permanent injury count mismatch"
        );
        live.note(
            NoteKind::Warnings,
            format!(
                "Wyld Cancer {total} calls for {expected} permanent injuries, {recorded} recorded"
            ),
        );
    }
}

/// Re-clamps the floor-1 skills from their shadows.
pub(super) fn skill_floors(engine: &SheetEngine<'_>, live: &mut LiveSheet) {
    for skill in FLOOR_ONE_SKILLS {
        let clamp = engine
            .schema()
            .get(skill)
            .and_then(|spec| spec.clamp)
            .unwrap_or(Clamp::Floor1);
        live.set_int(skill, clamp.apply(live.actual(skill)));
    }
}

/// Initiative for a `physical + smarts + resources` sum.
///
/// Width-3 buckets up to 27 (1–3 → 1 … 25–27 → 9), 28–32 → 10, then a
/// third of the sum. Never below 1.
pub fn initiative_for(sum: i32) -> i32 {
    let base = match sum {
        i32::MIN..=0 => 1,
        1..=27 => (sum + 2) / 3,
        28..=32 => 10,
        _ => sum / 3,
    };
    base.max(1)
}

pub(super) fn initiative(live: &mut LiveSheet) {
    let sum = live
        .int("physical")
        .saturating_add(live.int("smarts"))
        .saturating_add(live.int("resources"));
    let value = initiative_for(sum).saturating_add(live.int("initiative_bonus"));
    live.set_int("initiative", value);
}

/// Threshold for one damage track from its base value.
pub fn wound_threshold(base: i32) -> i32 {
    (base.saturating_add(4) / 3).max(1)
}

/// Mook threshold from the sum of every track's base.
pub fn mook_threshold(base_sum: i32) -> i32 {
    (base_sum.saturating_add(6) / 7).max(1)
}

/// `base = primary_actual + secondary - (1 if the secondary has a floor)`.
pub(super) fn wound_thresholds(engine: &SheetEngine<'_>, live: &mut LiveSheet) {
    let mut base_sum: i32 = 0;
    for track in WoundTrack::iter() {
        let secondary = track.secondary();
        let floor_adjust = match engine.schema().get(secondary).and_then(|spec| spec.clamp) {
            Some(Clamp::Floor1) => 1,
            _ => 0,
        };
        let base = live
            .actual(track.primary())
            .saturating_add(live.int(secondary))
            .saturating_sub(floor_adjust);
        base_sum = base_sum.saturating_add(base);
        let value = wound_threshold(base).saturating_add(live.int(track.bonus()));
        live.set_int(track.threshold(), value);
    }
    let mook = mook_threshold(base_sum).saturating_add(live.int("mook_wt_bonus"));
    live.set_int("mook_wt", mook);
}

/// Re-clamps every range-clamped attribute from its shadow.
pub(super) fn armour_caps(engine: &SheetEngine<'_>, live: &mut LiveSheet) {
    let capped: Vec<(String, Clamp)> = engine
        .schema()
        .clamped()
        .filter(|(_, clamp)| matches!(clamp, Clamp::Range { .. }))
        .map(|(spec, clamp)| (spec.name.clone(), clamp))
        .collect();
    for (name, clamp) in capped {
        live.set_int(name.clone(), clamp.apply(live.actual(&name)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::graph::NodeGraph;
    use crate::schema::Schema;

    fn sheet() -> (CharacterRecord, LiveSheet) {
        let character = CharacterRecord::new(1, "Ash", 1, NodeGraph::standard());
        let live = LiveSheet::new(Schema::standard(), &character);
        (character, live)
    }

    #[test]
    fn initiative_table_buckets() {
        assert_eq!(initiative_for(-4), 1);
        assert_eq!(initiative_for(0), 1);
        assert_eq!(initiative_for(1), 1);
        assert_eq!(initiative_for(3), 1);
        assert_eq!(initiative_for(4), 2);
        assert_eq!(initiative_for(25), 9);
        assert_eq!(initiative_for(27), 9);
        assert_eq!(initiative_for(28), 10);
        assert_eq!(initiative_for(32), 10);
        assert_eq!(initiative_for(33), 11);
        assert_eq!(initiative_for(40), 13);
    }

    #[test]
    fn initiative_includes_the_flat_bonus() {
        let (_, mut live) = sheet();
        live.set_int("physical", 4);
        live.set_int("smarts", 3);
        live.set_int("resources", 2);
        live.set_int("initiative_bonus", 2);
        initiative(&mut live);
        assert_eq!(live.int("initiative"), 5);
    }

    #[test]
    fn physical_threshold_from_actual_and_endurance() {
        let catalog = StaticCatalog::default();
        let engine = SheetEngine::new(&catalog);
        let (_, mut live) = sheet();
        live.set_actual("physical", 6);
        live.set_int("physical", 6);
        live.set_int("endurance", 3);

        wound_thresholds(&engine, &mut live);
        // 6 + 3 - 1 = 8 -> 4
        assert_eq!(live.int("physical_wt"), 4);

        live.set_int("physical_wt_bonus", 2);
        wound_thresholds(&engine, &mut live);
        assert_eq!(live.int("physical_wt"), 6);
    }

    #[test]
    fn thresholds_never_drop_below_one() {
        assert_eq!(wound_threshold(-5), 1);
        assert_eq!(wound_threshold(0), 1);
        assert_eq!(wound_threshold(2), 2);
        assert_eq!(mook_threshold(-20), 1);
        assert_eq!(mook_threshold(1), 1);
        assert_eq!(mook_threshold(8), 2);
        assert_eq!(mook_threshold(22), 4);
    }

    #[test]
    fn wyld_cancer_compares_expected_injuries() {
        let catalog = StaticCatalog::default();
        let engine = SheetEngine::new(&catalog);
        let (mut character, mut live) = sheet();
        live.set_int("wyld_cancer", 9);
        live.set_int("wyld_cancer_multiplier", 2);
        live.set_int("wyld_cancer_extra", 3);

        wyld_cancer(&engine, &character, &mut live);
        assert_eq!(live.int("wyld_cancer_total"), 21);
        assert_eq!(live.int("permanent_injuries_expected"), 2);
        assert_eq!(live.notes(NoteKind::Warnings).len(), 1);

        character.nodes.set("injury_n0", "i_scarred");
        character.nodes.set("injury_n1", "i_limp");
        let (_, mut live2) = sheet();
        live2.set_int("wyld_cancer", 21);
        wyld_cancer(&engine, &character, &mut live2);
        assert!(live2.notes(NoteKind::Warnings).is_empty());
    }

    #[test]
    fn wyld_cancer_injuries_are_capped() {
        let catalog = StaticCatalog::default();
        let engine = SheetEngine::new(&catalog);
        let (character, mut live) = sheet();
        live.set_int("wyld_cancer", 500);
        wyld_cancer(&engine, &character, &mut live);
        assert_eq!(live.int("permanent_injuries_expected"), 5);

        let (_, mut low) = sheet();
        low.set_int("wyld_cancer", 9);
        wyld_cancer(&engine, &character, &mut low);
        assert_eq!(low.int("permanent_injuries_expected"), 0);
        assert!(low.notes(NoteKind::Warnings).is_empty());
    }

    #[test]
    fn extreme_values_saturate() {
        let catalog = StaticCatalog::default();
        let engine = SheetEngine::new(&catalog);
        let (character, mut live) = sheet();
        live.set_int("wyld_cancer", i32::MAX);
        live.set_int("wyld_cancer_multiplier", 3);
        live.set_int("wyld_cancer_extra", 10);
        wyld_cancer(&engine, &character, &mut live);
        assert_eq!(live.int("wyld_cancer_total"), i32::MAX);
        assert_eq!(live.int("permanent_injuries_expected"), 5);

        live.set_int("physical", i32::MAX);
        live.set_int("smarts", i32::MAX);
        live.set_int("initiative_bonus", i32::MAX);
        initiative(&mut live);
        assert_eq!(live.int("initiative"), i32::MAX);

        live.set_actual("physical", i32::MAX);
        live.set_int("endurance", i32::MAX);
        live.set_int("physical_wt_bonus", i32::MAX);
        wound_thresholds(&engine, &mut live);
        assert_eq!(live.int("physical_wt"), i32::MAX);
        assert_eq!(wound_threshold(i32::MAX), i32::MAX / 3);
        assert_eq!(mook_threshold(i32::MAX), i32::MAX / 7);
    }

    #[test]
    fn caps_hold_after_large_deltas() {
        let catalog = StaticCatalog::default();
        let engine = SheetEngine::new(&catalog);
        let (_, mut live) = sheet();
        live.set_actual("fire_armour", 11);
        live.set_actual("impact_armour", -3);
        live.set_actual("composure", -4);
        armour_caps(&engine, &mut live);
        skill_floors(&engine, &mut live);
        assert_eq!(live.int("fire_armour"), 4);
        assert_eq!(live.int("impact_armour"), 0);
        assert_eq!(live.int("composure"), 1);
        assert_eq!(live.actual("fire_armour"), 11);
    }
}
