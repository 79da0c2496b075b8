use serde::{Deserialize, Serialize};

/// Rule constants and tunable parameters for the housekeeping pass.
///
/// Every field has a built-in default, so a partial `rules.toml` only needs to
/// name the values it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Languages every character may know before `bonus_languages`.
    pub base_languages: i32,

    /// Wyld Cancer points per permanent injury.
    pub wyld_cancer_injury_threshold: i32,

    /// Upper bound on the permanent injuries Wyld Cancer can demand.
    pub max_permanent_injuries: i32,

    /// A sliverware set is complete once its implant count exceeds this.
    pub sliverware_set_size: i32,

    /// Number of specialisation mastery slots (`mastery_n0..`).
    pub mastery_slots: usize,

    /// Talent points granted at character creation.
    pub creation_talent_points: i32,
}

impl RulesConfig {
    pub const DEFAULT_BASE_LANGUAGES: i32 = 2;
    pub const DEFAULT_WYLD_CANCER_INJURY_THRESHOLD: i32 = 10;
    pub const DEFAULT_MAX_PERMANENT_INJURIES: i32 = 5;
    pub const DEFAULT_SLIVERWARE_SET_SIZE: i32 = 6;
    pub const DEFAULT_MASTERY_SLOTS: usize = 3;
    pub const DEFAULT_CREATION_TALENT_POINTS: i32 = 30;

    /// Built-in rules, usable in `static` and `const` contexts.
    pub const STANDARD: RulesConfig = RulesConfig::new();

    pub const fn new() -> Self {
        Self {
            base_languages: Self::DEFAULT_BASE_LANGUAGES,
            wyld_cancer_injury_threshold: Self::DEFAULT_WYLD_CANCER_INJURY_THRESHOLD,
            max_permanent_injuries: Self::DEFAULT_MAX_PERMANENT_INJURIES,
            sliverware_set_size: Self::DEFAULT_SLIVERWARE_SET_SIZE,
            mastery_slots: Self::DEFAULT_MASTERY_SLOTS,
            creation_talent_points: Self::DEFAULT_CREATION_TALENT_POINTS,
        }
    }

    pub fn with_creation_talent_points(mut self, points: i32) -> Self {
        self.creation_talent_points = points;
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
