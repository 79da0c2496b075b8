//! Breed templates.
//!
//! Every breed is a fixed list of `(location, mod_id)` grants force-inserted
//! when the breed is chosen. Grants skip prerequisite and placement checks,
//! and a granted mod is *locked*: it can only be removed or overwritten with
//! an explicit override.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// One forced placement of a breed template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BreedGrant {
    pub location: &'static str,
    pub mod_id: &'static str,
}

const fn grant(location: &'static str, mod_id: &'static str) -> BreedGrant {
    BreedGrant { location, mod_id }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Breed {
    Human,
    Hulk,
    Shade,
    Sylph,
    Tinker,
}

const HUMAN: &[BreedGrant] = &[
    grant(Breed::ROOT_LOCATION, "b_human"),
    grant("language_n0", "l_common"),
];

const HULK: &[BreedGrant] = &[
    grant(Breed::ROOT_LOCATION, "b_hulk"),
    grant("athletics_edge_n0", "e_gigantic"),
    grant("trait_n0", "t_thick_skinned"),
    grant("language_n0", "l_common"),
];

const SHADE: &[BreedGrant] = &[
    grant(Breed::ROOT_LOCATION, "b_shade"),
    grant("stealth_edge_n0", "e_shadow_step"),
    grant("trait_n0", "t_night_eyes"),
    grant("language_n0", "l_common"),
];

const SYLPH: &[BreedGrant] = &[
    grant(Breed::ROOT_LOCATION, "b_sylph"),
    grant("wyld_skill_n0", "sk_wyld_1"),
    grant("trait_n0", "t_wyld_touched"),
    grant("language_n0", "l_sylvan"),
];

const TINKER: &[BreedGrant] = &[
    grant(Breed::ROOT_LOCATION, "b_tinker"),
    grant("tech_edge_n0", "e_jury_rig"),
    grant("language_n0", "l_common"),
    grant("language_n1", "l_cant"),
];

impl Breed {
    /// Node holding the breed's own mod.
    pub const ROOT_LOCATION: &'static str = "breed_n0";

    /// Every forced placement, root mod first.
    pub const fn grants(self) -> &'static [BreedGrant] {
        match self {
            Self::Human => HUMAN,
            Self::Hulk => HULK,
            Self::Shade => SHADE,
            Self::Sylph => SYLPH,
            Self::Tinker => TINKER,
        }
    }

    /// The breed's own mod id, placed at [`Breed::ROOT_LOCATION`].
    pub const fn root_mod(self) -> &'static str {
        self.grants()[0].mod_id
    }

    /// Talent points the breed costs, deducted from the character's total.
    pub const fn talent_bonus(self) -> i32 {
        match self {
            Self::Human => 0,
            Self::Hulk => 4,
            Self::Shade | Self::Sylph => 3,
            Self::Tinker => 2,
        }
    }

    pub fn from_root_mod(mod_id: &str) -> Option<Self> {
        Self::iter().find(|breed| breed.root_mod() == mod_id)
    }

    /// True if the template maps exactly `location` to exactly `mod_id`.
    pub fn locks(self, location: &str, mod_id: &str) -> bool {
        self.grants()
            .iter()
            .any(|grant| grant.location == location && grant.mod_id == mod_id)
    }
}
