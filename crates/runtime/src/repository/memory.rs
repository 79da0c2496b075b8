use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::{Record, Repository};

/// In-memory implementation of [`Repository`].
///
/// Records are kept as JSON so loads hand out fresh copies, the same way the
/// SQLite tables do.
pub struct InMemoryRepository<T> {
    blobs: RwLock<BTreeMap<i64, String>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(BTreeMap::new()),
            _record: PhantomData,
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn save(&self, record: &T) -> Result<()> {
        let blob = serde_json::to_string(record)?;
        self.blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .insert(record.id(), blob);
        Ok(())
    }

    fn load(&self, id: i64) -> Result<Option<T>> {
        let blobs = self.blobs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        blobs
            .get(&id)
            .map(|blob| serde_json::from_str(blob).map_err(RepositoryError::from))
            .transpose()
    }

    fn delete(&self, id: i64) -> Result<()> {
        self.blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<i64>> {
        let blobs = self.blobs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(blobs.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::PlayerRecord;

    use super::*;

    #[test]
    fn behaves_like_a_table() {
        let repo = InMemoryRepository::<PlayerRecord>::new();
        assert_eq!(repo.next_id().unwrap(), 1);
        repo.save(&PlayerRecord::new(2, "ash")).unwrap();
        repo.save(&PlayerRecord::new(1, "bryn")).unwrap();

        assert_eq!(repo.list_ids().unwrap(), [1, 2]);
        assert_eq!(repo.next_id().unwrap(), 3);
        let names: Vec<_> = repo.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["bryn", "ash"]);

        repo.delete(2).unwrap();
        assert!(!repo.exists(2).unwrap());
    }
}
