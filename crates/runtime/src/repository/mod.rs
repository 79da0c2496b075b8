//! Repository layer for player and character data
//!
//! Repositories hold data that CHANGES as characters are built:
//! - Player accounts
//! - Character records (the selections)
//! - Live sheets (the derived view, regenerable from the record)
//!
//! The static mod catalog is content, not repository data.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRepository;
pub use sqlite::{SqliteStore, SqliteTable};
pub use traits::{Record, Repository};

use sheet_core::{CharacterRecord, LiveSheet, PlayerRecord};

/// The three repositories a [`crate::CharacterService`] works against.
pub struct Repositories {
    pub players: Box<dyn Repository<PlayerRecord>>,
    pub characters: Box<dyn Repository<CharacterRecord>>,
    pub live: Box<dyn Repository<LiveSheet>>,
}

impl Repositories {
    pub fn sqlite(store: &SqliteStore) -> Self {
        Self {
            players: Box::new(store.players()),
            characters: Box::new(store.characters()),
            live: Box::new(store.live_characters()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            players: Box::new(InMemoryRepository::new()),
            characters: Box::new(InMemoryRepository::new()),
            live: Box::new(InMemoryRepository::new()),
        }
    }
}
