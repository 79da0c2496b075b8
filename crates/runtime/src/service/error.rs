//! Errors surfaced by the character service.

use sheet_core::{CharacterId, PlayerId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("player {0} does not exist")]
    PlayerNotFound(PlayerId),

    #[error("character {0} does not exist")]
    CharacterNotFound(CharacterId),

    #[error("failed to export character {id}")]
    Export {
        id: CharacterId,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Why an import document was rejected. Nothing is written on any of these.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import document is not valid JSON")]
    Malformed(#[source] serde_json::Error),

    #[error("unsupported export format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("unknown mod ids: {}", .0.join(", "))]
    UnknownMods(Vec<String>),

    #[error("unknown locations: {}", .0.join(", "))]
    UnknownLocations(Vec<String>),

    #[error("unknown mod ids: {}; unknown locations: {}", .mods.join(", "), .locations.join(", "))]
    UnknownReferences {
        mods: Vec<String>,
        locations: Vec<String>,
    },

    #[error("player {0} does not exist")]
    MissingPlayer(PlayerId),
}
