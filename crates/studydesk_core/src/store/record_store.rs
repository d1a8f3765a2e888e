use crate::store::{KeyValueStore, RepoError, RepoResult};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the password-stripped current user.
pub const SESSION_KEY: &str = "currentUser";

/// Named record collections persisted as JSON arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Tasks,
    Notes,
    QuickNotes,
}

impl Collection {
    /// Backing-store key for this collection.
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tasks => "tasks",
            Self::Notes => "notes",
            Self::QuickNotes => "quickNotes",
        }
    }
}

/// A record owned by one user and stored in one collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn owner_id(&self) -> &str;
}

/// Typed JSON collections over a `KeyValueStore`.
#[derive(Debug, Clone, Default)]
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads a whole collection. A missing key reads as empty.
    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> RepoResult<Vec<T>> {
        Ok(self.read_value(collection.key())?.unwrap_or_default())
    }

    /// Replaces a whole collection.
    pub fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> RepoResult<()> {
        self.write_value(collection.key(), &records)
    }

    /// Reads one JSON value stored under `key`.
    pub fn read_value<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| RepoError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Writes one JSON value under `key`.
    pub fn write_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> RepoResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| RepoError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }

    pub fn remove_value(&self, key: &str) -> RepoResult<()> {
        self.backend.remove(key)
    }

    /// Lists records, optionally restricted to one owner. Order is insertion order.
    pub fn list<T: Record>(&self, owner_id: Option<&str>) -> RepoResult<Vec<T>> {
        let records = self.read::<T>(T::COLLECTION)?;
        Ok(match owner_id {
            Some(owner_id) => records
                .into_iter()
                .filter(|record| record.owner_id() == owner_id)
                .collect(),
            None => records,
        })
    }

    /// Appends one record and persists the collection.
    pub fn append<T: Record>(&self, record: T) -> RepoResult<T> {
        let mut records = self.read::<T>(T::COLLECTION)?;
        records.push(record.clone());
        self.write(T::COLLECTION, &records)?;
        debug!(
            "event=record_append module=store status=ok collection={} size={}",
            T::COLLECTION.key(),
            records.len()
        );
        Ok(record)
    }

    /// Applies `change` to the record with `id` and persists.
    ///
    /// Returns `false` without writing when no record has that id.
    pub fn modify<T: Record>(&self, id: &str, change: impl FnOnce(&mut T)) -> RepoResult<bool> {
        let mut records = self.read::<T>(T::COLLECTION)?;
        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            debug!(
                "event=record_modify module=store status=skipped collection={} reason=not_found",
                T::COLLECTION.key()
            );
            return Ok(false);
        };

        change(record);
        self.write(T::COLLECTION, &records)?;
        Ok(true)
    }

    /// Removes the record with `id` and persists.
    ///
    /// Returns `false` without writing when no record has that id.
    pub fn remove<T: Record>(&self, id: &str) -> RepoResult<bool> {
        let mut records = self.read::<T>(T::COLLECTION)?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            debug!(
                "event=record_remove module=store status=skipped collection={} reason=not_found",
                T::COLLECTION.key()
            );
            return Ok(false);
        }

        self.write(T::COLLECTION, &records)?;
        Ok(true)
    }
}
