//! Per-call connection provisioning.
//!
//! # Responsibility
//! - Define the "acquire a scoped connection" contract used by repositories.
//! - Provide a SQLite implementation for file and shared in-memory databases.
//!
//! # Invariants
//! - A `ScopedConnection` is closed when dropped, on every exit path.
//! - A provider bootstraps its schema once, at construction.
//! - Two in-memory providers never share data.

use super::open::{connect, open_bootstrapped, ConnectionTarget};
use super::DbResult;
use log::{debug, error};
use rusqlite::Connection;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Source of connections scoped to a single repository call.
pub trait ConnectionProvider {
    /// Opens a connection that lives until the returned guard is dropped.
    fn acquire(&self) -> DbResult<ScopedConnection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn acquire(&self) -> DbResult<ScopedConnection> {
        (**self).acquire()
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for Arc<P> {
    fn acquire(&self) -> DbResult<ScopedConnection> {
        (**self).acquire()
    }
}

/// Owned connection released when the guard goes out of scope.
#[derive(Debug)]
pub struct ScopedConnection {
    conn: Connection,
    mode: &'static str,
}

impl ScopedConnection {
    /// Wraps an already configured connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            mode: "external",
        }
    }
}

impl Deref for ScopedConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        debug!("event=db_release module=db status=ok mode={}", self.mode);
    }
}

/// SQLite-backed provider opening a fresh connection per `acquire`.
#[derive(Debug)]
pub struct SqliteConnectionProvider {
    target: ConnectionTarget,
    // Shared in-memory databases vanish once their last connection closes.
    _keep_alive: Option<Mutex<Connection>>,
}

impl SqliteConnectionProvider {
    /// Creates a provider for a database file, bootstrapping its schema.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let target = ConnectionTarget::File(path.as_ref().to_path_buf());
        drop(open_bootstrapped(&target)?);
        Ok(Self {
            target,
            _keep_alive: None,
        })
    }

    /// Creates a provider for a fresh, uniquely named in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        let target = ConnectionTarget::SharedMemory(format!("catalog-{}", Uuid::new_v4()));
        let keep_alive = open_bootstrapped(&target)?;
        Ok(Self {
            target,
            _keep_alive: Some(Mutex::new(keep_alive)),
        })
    }

    /// Returns the database file path, or `None` for in-memory providers.
    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            ConnectionTarget::File(path) => Some(path.as_path()),
            ConnectionTarget::Memory | ConnectionTarget::SharedMemory(_) => None,
        }
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn acquire(&self) -> DbResult<ScopedConnection> {
        let mode = self.target.mode();
        match connect(&self.target) {
            Ok(conn) => {
                debug!("event=db_acquire module=db status=ok mode={mode}");
                Ok(ScopedConnection { conn, mode })
            }
            Err(err) => {
                error!(
                    "event=db_acquire module=db status=error mode={mode} error_code=db_acquire_failed error={err}"
                );
                Err(err.into())
            }
        }
    }
}
