//! Character sheet rules shared by every front end.
//!
//! `sheet-core` holds the canonical rule engine: the mod catalog contract, the
//! node graph, the attribute schema, prerequisite evaluation, mod application
//! and the housekeeping pass. It performs no I/O. All mutation of a
//! character's selections flows through [`engine::SheetEngine`], and the
//! loader and persistence crates depend on the types re-exported here.
pub mod breed;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod housekeeping;
pub mod requirement;
pub mod schema;
pub mod sheet;

pub use breed::{Breed, BreedGrant};
pub use catalog::{
    CatalogOracle, EffectValue, MasterySpec, Mod, ModCategory, ModQuery, Requirement,
    RequirementMode, StaticCatalog,
};
pub use config::RulesConfig;
pub use engine::{ApplyFlags, ApplyOutcome, ApplyRequest, RemoveOutcome, SheetEngine};
pub use error::{CatalogError, ErrorSeverity, GraphError, Refusal};
pub use graph::{ENTRY_NODE, Node, NodeGraph};
pub use housekeeping::{LifestyleRung, SocialClass};
pub use requirement::{Verdict, evaluate};
pub use schema::{AttrValue, AttributeSpec, Clamp, CombinePolicy, Schema};
pub use sheet::{
    AppliedMod, CharacterId, CharacterKind, CharacterRecord, LiveSheet, NodeMap, NoteKind,
    PlayerId, PlayerRecord, SecondaryInfo, TalentPoints,
};
