//! The built-in attribute table and the rule vocabulary it is built from.

use strum::{Display, EnumIter, IntoEnumIterator};

use super::AttributeSpec;

/// Primary skills, each with its own `<primary>_skill` track.
pub const PRIMARY_SKILLS: [&str; 6] = [
    "physical",
    "smarts",
    "resources",
    "influence",
    "wyld",
    "divinity",
];

/// Skills whose public value never drops below 1.
pub const FLOOR_ONE_SKILLS: [&str; 7] = [
    "physical",
    "smarts",
    "resources",
    "influence",
    "endurance",
    "composure",
    "connections",
];

/// Trained skills paired with the primary whose track they hang from.
pub const TRAINED_SKILLS: [(&str, &str); 17] = [
    ("athletics", "physical"),
    ("melee", "physical"),
    ("ranged", "physical"),
    ("stealth", "physical"),
    ("endurance", "physical"),
    ("academics", "smarts"),
    ("awareness", "smarts"),
    ("tech", "smarts"),
    ("medicine", "smarts"),
    ("composure", "smarts"),
    ("streetwise", "resources"),
    ("connections", "resources"),
    ("persuasion", "influence"),
    ("sorcery", "wyld"),
    ("attunement", "wyld"),
    ("ritual", "divinity"),
    ("devotion", "divinity"),
];

const DEFAULT_SKILL_LIMIT: i32 = 5;

/// The five damage tracks with a wound threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum WoundTrack {
    Physical,
    Smarts,
    Resources,
    Wyld,
    Divinity,
}

impl WoundTrack {
    pub const fn primary(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Smarts => "smarts",
            Self::Resources => "resources",
            Self::Wyld => "wyld",
            Self::Divinity => "divinity",
        }
    }

    /// The trained skill added to the primary when deriving the threshold.
    pub const fn secondary(self) -> &'static str {
        match self {
            Self::Physical => "endurance",
            Self::Smarts => "composure",
            Self::Resources => "connections",
            Self::Wyld => "attunement",
            Self::Divinity => "devotion",
        }
    }

    pub const fn threshold(self) -> &'static str {
        match self {
            Self::Physical => "physical_wt",
            Self::Smarts => "smarts_wt",
            Self::Resources => "resources_wt",
            Self::Wyld => "wyld_wt",
            Self::Divinity => "divinity_wt",
        }
    }

    pub const fn bonus(self) -> &'static str {
        match self {
            Self::Physical => "physical_wt_bonus",
            Self::Smarts => "smarts_wt_bonus",
            Self::Resources => "resources_wt_bonus",
            Self::Wyld => "wyld_wt_bonus",
            Self::Divinity => "divinity_wt_bonus",
        }
    }
}

/// Armour tracks, each clamped to its own range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ArmourTrack {
    Ballistic,
    Impact,
    Energy,
    Fire,
    Wyld,
    Mental,
}

impl ArmourTrack {
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Ballistic => "ballistic_armour",
            Self::Impact => "impact_armour",
            Self::Energy => "energy_armour",
            Self::Fire => "fire_armour",
            Self::Wyld => "wyld_armour",
            Self::Mental => "mental_armour",
        }
    }

    /// Inclusive `(min, max)`.
    pub const fn bounds(self) -> (i32, i32) {
        match self {
            Self::Ballistic | Self::Impact => (0, 6),
            Self::Energy | Self::Fire => (0, 4),
            Self::Wyld | Self::Mental => (0, 3),
        }
    }
}

/// The seven sliverware implant sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SliverwareSet {
    Ocular,
    Neural,
    Dermal,
    Skeletal,
    Cardiac,
    Muscular,
    Glandular,
}

impl SliverwareSet {
    /// Type code of implants belonging to this set.
    pub fn kind(self) -> String {
        format!("sw_{self}")
    }

    /// Prefix of the set's implant nodes (`sliverware_ocular_n0..`).
    pub fn node_prefix(self) -> String {
        format!("sliverware_{self}")
    }

    pub fn count_attribute(self) -> String {
        format!("sliverware_{self}_count")
    }

    /// Managed node holding the completion bonus.
    pub fn complete_location(self) -> String {
        format!("sliverware_{self}_complete")
    }

    pub fn complete_mod(self) -> String {
        format!("sw_{self}_complete")
    }
}

pub(super) fn attributes() -> Vec<AttributeSpec> {
    let mut specs = Vec::new();

    for primary in PRIMARY_SKILLS {
        specs.push(AttributeSpec::int(primary));
    }
    for (skill, _) in TRAINED_SKILLS {
        specs.push(AttributeSpec::int(skill));
        specs.push(AttributeSpec::int_with_default(
            format!("{skill}_limit"),
            DEFAULT_SKILL_LIMIT,
        ));
    }
    // Re-declared with a floor; `Schema::new` keeps the last declaration.
    for skill in FLOOR_ONE_SKILLS {
        specs.push(AttributeSpec::int(skill).floor_one());
    }

    for track in WoundTrack::iter() {
        specs.push(AttributeSpec::int(track.threshold()));
        specs.push(AttributeSpec::int(track.bonus()));
    }
    specs.push(AttributeSpec::int("mook_wt"));
    specs.push(AttributeSpec::int("mook_wt_bonus"));

    for track in ArmourTrack::iter() {
        let (min, max) = track.bounds();
        specs.push(AttributeSpec::int(track.attribute()).range(min, max));
    }

    for set in SliverwareSet::iter() {
        specs.push(AttributeSpec::int(set.count_attribute()));
    }

    specs.extend([
        AttributeSpec::int("initiative"),
        AttributeSpec::int("initiative_bonus"),
        AttributeSpec::list("languages"),
        AttributeSpec::int("bonus_languages"),
        AttributeSpec::int("wyld_cancer"),
        AttributeSpec::int_with_default("wyld_cancer_multiplier", 1),
        AttributeSpec::int("wyld_cancer_extra"),
        AttributeSpec::int("wyld_cancer_total"),
        AttributeSpec::int("permanent_injuries_expected"),
        AttributeSpec::int("lifestyle_change"),
        AttributeSpec::int("reputation"),
        AttributeSpec::int("tp_total"),
        AttributeSpec::int("tp_spent"),
        AttributeSpec::int("tp_unspent"),
        AttributeSpec::replace_text("breed"),
        AttributeSpec::replace_text("culture"),
        AttributeSpec::replace_text("citizenship"),
        AttributeSpec::replace_text("social_class"),
        AttributeSpec::replace_text("lifestyle"),
        AttributeSpec::replace_text("organisation"),
        AttributeSpec::replace_text("rank"),
        AttributeSpec::replace_text("disciple"),
        AttributeSpec::replace_text("callsign"),
        AttributeSpec::text("abilities"),
        AttributeSpec::text("special_rules"),
        AttributeSpec::list("soulweaves"),
        AttributeSpec::flag("night_vision"),
        AttributeSpec::flag("can_soulweave"),
        AttributeSpec::flag("wyld_touched"),
    ]);

    specs
}
