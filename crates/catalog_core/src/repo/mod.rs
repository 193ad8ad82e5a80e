//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/controller callers.
//!
//! # Invariants
//! - Repositories hold a connection provider, never a live connection.
//! - Storage failures surface as `RepoError::StorageAccess`.

pub mod category_repo;
