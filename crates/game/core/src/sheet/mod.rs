//! Character records: the raw selections and the derived live sheet.
mod character;
mod live;

pub use character::{
    CharacterId, CharacterKind, CharacterRecord, NodeMap, PlayerId, PlayerRecord, SecondaryInfo,
    TalentPoints,
};
pub use live::{AppliedMod, LiveSheet, NoteKind};
