//! Process-wide store handle.
//!
//! # Responsibility
//! - Open the application database lazily, once per process.
//! - Serialize access to the single connection behind a mutex.
//!
//! # Invariants
//! - The first successful caller decides the database path; later callers
//!   receive the same store regardless of the path they pass.
//! - A failed first open leaves the handle uninitialized so a later call can
//!   retry.

use super::{open_db, DbResult};
use log::warn;
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

static SHARED_STORE: OnceCell<SharedStore> = OnceCell::new();

/// Single shared connection plus the path it was opened from.
pub struct SharedStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SharedStore {
    /// Path of the database file backing this store.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Runs `f` with exclusive access to the shared connection.
    ///
    /// A poisoned lock is recovered: the connection carries no in-memory
    /// state that a panicking holder could have left half-written.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

/// Returns the process-wide store, opening it at `path` on first use.
///
/// # Errors
/// - Returns open/migration errors from the first initialization attempt.
pub fn shared_store(path: impl AsRef<Path>) -> DbResult<&'static SharedStore> {
    let requested = path.as_ref();
    let store = SHARED_STORE.get_or_try_init(|| -> DbResult<SharedStore> {
        let conn = open_db(requested)?;
        Ok(SharedStore {
            path: requested.to_path_buf(),
            conn: Mutex::new(conn),
        })
    })?;

    if store.path != requested {
        warn!(
            "event=store_reuse module=db status=ok active_path={} requested_path={}",
            store.path.display(),
            requested.display()
        );
    }

    Ok(store)
}
