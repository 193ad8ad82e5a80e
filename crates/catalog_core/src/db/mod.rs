//! SQLite storage bootstrap and connection provisioning.
//!
//! # Responsibility
//! - Open and configure SQLite connections for catalog core.
//! - Hand out per-call scoped connections to repositories.
//! - Ensure the `Categories` schema exists before data access.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Every connection handed out has `foreign_keys=ON` and a busy timeout.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod provider;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use provider::{ConnectionProvider, ScopedConnection, SqliteConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog schema version {db_version} was written by a newer build; \
                 this build understands up to version {latest_supported}"
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
