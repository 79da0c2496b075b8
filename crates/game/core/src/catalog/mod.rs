//! The mod catalog ("gamedata").
//!
//! Mods are immutable, externally owned records. The engine reaches them only
//! through [`CatalogOracle`], so content can come from RON files, fixtures,
//! or any other source.
mod oracle;
mod types;

pub use oracle::{CatalogOracle, ModQuery, StaticCatalog};
pub use types::{
    EffectValue, MasterySpec, Mod, ModCategory, NULL_REQUIREMENT, Requirement, RequirementMode,
    TEXT_PLACEHOLDER,
};
