//! Named-collection persistence over a string key-value backend.
//!
//! # Responsibility
//! - Define the `KeyValueStore` backend contract (SQLite or in-memory).
//! - Serialize whole record collections as JSON arrays under fixed keys.
//!
//! # Invariants
//! - A missing key reads as an empty collection.
//! - Every write replaces the whole collection (last write wins).
//! - Malformed persisted JSON is reported, never silently dropped.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod record_store;
mod sqlite_kv;

pub use memory_kv::MemoryKeyValueStore;
pub use record_store::{Collection, Record, RecordStore, SESSION_KEY};
pub use sqlite_kv::SqliteKeyValueStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error shared by the store and every repository built on it.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Decode {
        key: String,
        source: serde_json::Error,
    },
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Decode { key, source } => {
                write!(f, "invalid persisted data under `{key}`: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode records for `{key}`: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent string key-value backend.
///
/// Implementations assume a single writer; there is no cross-key transaction.
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> RepoResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        (**self).remove(key)
    }
}
