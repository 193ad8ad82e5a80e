//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file, private in-memory, or shared in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Ensure the catalog schema before returning a bootstrapped connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - `open_db*` connections have the schema fully applied.

use super::schema::ensure_schema;
use super::DbResult;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a connection points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConnectionTarget {
    File(PathBuf),
    /// Private to one connection; gone when it closes.
    Memory,
    /// Named shared-cache database, alive while any connection to it is open.
    SharedMemory(String),
}

impl ConnectionTarget {
    pub(crate) fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
            Self::SharedMemory(_) => "shared_memory",
        }
    }
}

/// Opens a SQLite database file and ensures the catalog schema.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_bootstrapped(&ConnectionTarget::File(path.as_ref().to_path_buf()))
}

/// Opens a private in-memory SQLite database with the catalog schema applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_bootstrapped(&ConnectionTarget::Memory)
}

/// Opens and configures a connection without touching the schema.
pub(crate) fn connect(target: &ConnectionTarget) -> rusqlite::Result<Connection> {
    let conn = match target {
        ConnectionTarget::File(path) => Connection::open(path)?,
        ConnectionTarget::Memory => Connection::open_in_memory()?,
        // Shared-cache table locks are waited out by rusqlite's `unlock_notify`,
        // which the busy timeout does not cover.
        ConnectionTarget::SharedMemory(name) => Connection::open_with_flags(
            format!("file:{name}?mode=memory&cache=shared"),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?,
    };

    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

pub(crate) fn open_bootstrapped(target: &ConnectionTarget) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = target.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect(target) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match ensure_schema(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
