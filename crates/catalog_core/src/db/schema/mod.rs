//! Versioned `Categories` schema bootstrap.
//!
//! # Responsibility
//! - Create the catalog tables on databases that do not have them yet.
//! - Refuse databases written by a newer schema version.
//!
//! # Invariants
//! - DDL is idempotent, so tables created outside this crate are accepted.
//! - The applied version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_categories.sql"),
}];

/// Table name shared by schema bootstrap and repository checks.
pub const CATEGORIES_TABLE: &str = "Categories";

/// Columns the repository reads and writes, in select order.
pub const CATEGORIES_COLUMNS: &[&str] = &["category_id", "name", "description"];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Ensures the catalog schema exists on the provided connection.
///
/// Runs inside one transaction; a failure leaves `user_version` untouched.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS {
        if step.version <= current_version {
            continue;
        }

        tx.execute_batch(step.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
    }
    tx.commit()?;

    info!(
        "event=schema_bootstrap module=db status=ok from_version={} to_version={}",
        current_version, latest
    );
    Ok(())
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
