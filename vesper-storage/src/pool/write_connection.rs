//! The single writer connection. SQLite allows one writer at a time; we keep
//! it behind a mutex and route every mutating query through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use vesper_core::VesperResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> VesperResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| to_storage_err(e.to_string()))?;
        }
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> VesperResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Execute a closure against the writer connection, holding the lock for
    /// the closure's duration.
    pub fn with_conn_sync<F, T>(&self, f: F) -> VesperResult<T>
    where
        F: FnOnce(&Connection) -> VesperResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("writer lock poisoned: {e}")))?;
        f(&guard)
    }
}
