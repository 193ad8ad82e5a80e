//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings for entry points.
//! - Build the matching connection provider.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - No database path means a private in-memory database.

use crate::db::{DbResult, SqliteConnectionProvider};
use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CATALOG_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CATALOG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CATALOG_LOG_DIR";

/// Resolved settings for opening the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Database file; `None` selects an in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl CatalogConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, keyed by the `*_ENV` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Opens the provider described by `db_path`.
    pub fn connection_provider(&self) -> DbResult<SqliteConnectionProvider> {
        match &self.db_path {
            Some(path) => SqliteConnectionProvider::open(path),
            None => SqliteConnectionProvider::in_memory(),
        }
    }
}
