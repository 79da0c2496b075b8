//! Lifestyle selection from wealth, influence and social class.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

use crate::engine::SheetEngine;
use crate::sheet::{CharacterRecord, LiveSheet, NoteKind};

/// Managed node holding the derived lifestyle mod.
pub const LIFESTYLE_LOCATION: &str = "lifestyle_n0";

/// The seven-rung lifestyle ladder, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum LifestyleRung {
    #[strum(serialize = "Upper Zen")]
    UpperZen,
    Zen,
    Downtown,
    Midtown,
    Suburbs,
    Slums,
    Undercity,
}

const LADDER: [LifestyleRung; 7] = [
    LifestyleRung::UpperZen,
    LifestyleRung::Zen,
    LifestyleRung::Downtown,
    LifestyleRung::Midtown,
    LifestyleRung::Suburbs,
    LifestyleRung::Slums,
    LifestyleRung::Undercity,
];

impl LifestyleRung {
    /// Position on the ladder, 0 being the best.
    pub fn index(self) -> usize {
        LADDER
            .iter()
            .position(|rung| *rung == self)
            .unwrap_or(LADDER.len() - 1)
    }

    /// Catalog id of the rung's lifestyle mod (`ls_upper_zen`, ...).
    pub fn mod_id(self) -> String {
        format!("ls_{}", self.as_ref().to_lowercase().replace(' ', "_"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SocialClass {
    Elite,
    #[strum(serialize = "Upper Class")]
    UpperClass,
    #[strum(serialize = "Middle Class")]
    MiddleClass,
    #[strum(serialize = "Working Class")]
    WorkingClass,
    #[strum(serialize = "Lower Class")]
    LowerClass,
    Outcast,
}

impl SocialClass {
    /// Ladder index for each tier, from D (0) to A (3).
    const fn ladder(self) -> [usize; 4] {
        match self {
            Self::Elite => [2, 1, 0, 0],
            Self::UpperClass => [3, 2, 1, 0],
            Self::MiddleClass => [4, 3, 2, 1],
            Self::WorkingClass => [5, 4, 3, 2],
            Self::LowerClass => [6, 5, 4, 3],
            Self::Outcast => [6, 6, 5, 4],
        }
    }
}

/// Tier for `resources + influence`: D (0) up to 4, C (1) to 7, B (2) to 11,
/// A (3) from 12.
pub fn res_inf_tier(res_inf: i32) -> usize {
    match res_inf {
        i32::MIN..=4 => 0,
        5..=7 => 1,
        8..=11 => 2,
        _ => 3,
    }
}

/// The rung for a class, a `resources + influence` sum and a lifestyle
/// penalty that pushes the tier down.
pub fn lifestyle_for(class: SocialClass, res_inf: i32, lifestyle_change: i32) -> LifestyleRung {
    let penalty = usize::try_from(lifestyle_change.max(0)).unwrap_or(usize::MAX);
    let tier = res_inf_tier(res_inf).saturating_sub(penalty);
    LADDER[class.ladder()[tier]]
}

pub(super) fn select(
    engine: &SheetEngine<'_>,
    character: &mut CharacterRecord,
    live: &mut LiveSheet,
) {
    let class = match SocialClass::from_str(live.text("social_class").trim()) {
        Ok(class) => class,
        Err(_) => {
            let given = live.text("social_class").to_string();
            live.note(
                NoteKind::Warnings,
                if given.is_empty() {
                    "No social class chosen, lifestyle uses Working Class".to_string()
                } else {
                    format!("Unknown social class {given:?}, lifestyle uses Working Class")
                },
            );
            SocialClass::WorkingClass
        }
    };
    let res_inf = live.int("resources").saturating_add(live.int("influence"));
    let rung = lifestyle_for(class, res_inf, live.int("lifestyle_change"));

    live.set_text("lifestyle", rung.to_string());
    live.touch("lifestyle", "Housekeeping");
    if !engine.force_apply(character, live, &rung.mod_id(), LIFESTYLE_LOCATION) {
        character.nodes.clear(LIFESTYLE_LOCATION);
    }
    debug!(target: "sheet::housekeeping", %class, res_inf, %rung, "lifestyle selected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EffectValue, Mod, ModCategory, StaticCatalog};
    use crate::graph::NodeGraph;

    #[test]
    fn tiers_follow_breakpoints() {
        assert_eq!(res_inf_tier(2), 0);
        assert_eq!(res_inf_tier(4), 0);
        assert_eq!(res_inf_tier(5), 1);
        assert_eq!(res_inf_tier(7), 1);
        assert_eq!(res_inf_tier(8), 2);
        assert_eq!(res_inf_tier(11), 2);
        assert_eq!(res_inf_tier(12), 3);
    }

    #[test]
    fn class_table_picks_rungs() {
        assert_eq!(lifestyle_for(SocialClass::MiddleClass, 8, 0), LifestyleRung::Downtown);
        assert_eq!(lifestyle_for(SocialClass::Elite, 20, 0), LifestyleRung::UpperZen);
        assert_eq!(lifestyle_for(SocialClass::Outcast, 0, 0), LifestyleRung::Undercity);
        // The penalty pushes the tier down before lookup.
        assert_eq!(lifestyle_for(SocialClass::MiddleClass, 8, 1), LifestyleRung::Midtown);
        assert_eq!(lifestyle_for(SocialClass::MiddleClass, 8, 9), LifestyleRung::Suburbs);
        assert_eq!(lifestyle_for(SocialClass::MiddleClass, 8, -2), LifestyleRung::Downtown);
    }

    #[test]
    fn rungs_know_their_mods() {
        assert_eq!(LifestyleRung::UpperZen.mod_id(), "ls_upper_zen");
        assert_eq!(LifestyleRung::Downtown.to_string(), "Downtown");
        assert_eq!(LifestyleRung::Downtown.index(), 2);
        assert_eq!(SocialClass::from_str("middle class"), Ok(SocialClass::MiddleClass));
    }

    #[test]
    fn middle_class_with_eight_res_inf_lives_downtown() {
        let catalog = StaticCatalog::new([
            Mod::new("ls_downtown", "Downtown", ModCategory::Lifestyle, "lsf")
                .with_effect("special_rules", EffectValue::Text("Doorman".into())),
        ])
        .unwrap();
        let engine = SheetEngine::new(&catalog);
        let mut character = CharacterRecord::new(1, "Ash", 1, NodeGraph::standard());
        let mut live = LiveSheet::new(engine.schema(), &character);
        live.set_int("resources", 5);
        live.set_int("influence", 3);
        live.set_text("social_class", "Middle Class");

        select(&engine, &mut character, &mut live);
        assert_eq!(live.text("lifestyle"), "Downtown");
        assert_eq!(character.nodes.get(LIFESTYLE_LOCATION), Some("ls_downtown"));
        assert_eq!(live.text("special_rules"), "Doorman");
        assert!(live.notes(NoteKind::Warnings).is_empty());
    }

    #[test]
    fn unknown_class_falls_back_with_a_warning() {
        let catalog = StaticCatalog::default();
        let engine = SheetEngine::new(&catalog);
        let mut character = CharacterRecord::new(1, "Ash", 1, NodeGraph::standard());
        character.nodes.set(LIFESTYLE_LOCATION, "ls_slums");
        let mut live = LiveSheet::new(engine.schema(), &character);
        live.set_text("social_class", "Pirate King");

        select(&engine, &mut character, &mut live);
        // Working class, res_inf 2 -> tier D -> Slums.
        assert_eq!(live.text("lifestyle"), "Slums");
        assert_eq!(live.notes(NoteKind::Warnings).len(), 1);
        // No catalog mod for the rung: the managed node is cleared.
        assert_eq!(character.nodes.get(LIFESTYLE_LOCATION), None);
    }
}
