//! Repository contracts for saving and loading player and character data.

use serde::Serialize;
use serde::de::DeserializeOwned;
use sheet_core::{CharacterRecord, LiveSheet, PlayerRecord};

use super::error::Result;

/// A value stored as one JSON blob under an integer key.
pub trait Record: Serialize + DeserializeOwned {
    /// Table the record lives in.
    const TABLE: &'static str;

    fn id(&self) -> i64;
}

impl Record for PlayerRecord {
    const TABLE: &'static str = "players";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for CharacterRecord {
    const TABLE: &'static str = "characters";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for LiveSheet {
    const TABLE: &'static str = "live_characters";

    fn id(&self) -> i64 {
        self.character_id
    }
}

/// Key-value persistence for one record type.
///
/// Saving overwrites the whole blob; there are no partial updates.
pub trait Repository<T: Record>: Send + Sync {
    /// Insert or overwrite the record under its own id.
    fn save(&self, record: &T) -> Result<()>;

    /// Load a record by id.
    fn load(&self, id: i64) -> Result<Option<T>>;

    /// Check if a record exists
    fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.load(id)?.is_some())
    }

    /// Remove a record. Deleting a missing id is not an error.
    fn delete(&self, id: i64) -> Result<()>;

    /// All stored ids in ascending order.
    fn list_ids(&self) -> Result<Vec<i64>>;

    /// Every stored record in id order.
    fn list(&self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        for id in self.list_ids()? {
            if let Some(record) = self.load(id)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// The id the next inserted record should take.
    fn next_id(&self) -> Result<i64> {
        Ok(self.list_ids()?.last().map_or(1, |last| last + 1))
    }
}
