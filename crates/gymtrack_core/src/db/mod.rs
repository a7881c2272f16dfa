//! SQLite storage bootstrap, schema migrations and the shared store handle.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the gym tracking core.
//! - Apply schema migrations in deterministic order.
//! - Own the process-wide store that callers reuse across requests.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod store;

pub use open::{open_db, open_db_in_memory};
pub use store::{shared_store, SharedStore};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening the gym store or running a statement on it.
///
/// Accessors wrap this in `RepoError::Db`; the FFI layer renders it into the
/// `message` of a failed response.
#[derive(Debug)]
pub enum DbError {
    /// Driver error: file cannot be opened, the store is locked past the
    /// busy timeout, a constraint fails, or SQL is rejected.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer app build; it is left untouched.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "gym store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
