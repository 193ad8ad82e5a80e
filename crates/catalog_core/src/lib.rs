//! Core data access for the store catalog.
//! Owns the `Categories` table and the connections used to reach it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::CatalogConfig;
pub use db::{ConnectionProvider, DbError, DbResult, ScopedConnection, SqliteConnectionProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryDraft, CategoryId};
pub use repo::category_repo::{
    CategoryRepository, RepoError, RepoResult, SqliteCategoryRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
