//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete over the `Categories` table.
//! - Keep SQL details and row decoding inside the persistence boundary.
//!
//! # Invariants
//! - Each operation acquires its own scoped connection and releases it on
//!   every exit path.
//! - A single statement is the only unit of work; nothing is retried.
//! - Update/delete of a missing id is a silent no-op.
//! - `list_all` returns everything or an error, never a partial list.

use crate::db::schema::{CATEGORIES_COLUMNS, CATEGORIES_TABLE};
use crate::db::{ConnectionProvider, DbError};
use crate::model::category::{Category, CategoryDraft, CategoryId};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CATEGORY_SELECT_SQL: &str = "SELECT
    category_id,
    name,
    description
FROM Categories";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for category persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Connection acquisition or statement execution failed.
    StorageAccess(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// The inserted row was gone before it could be read back.
    CreatedRowMissing(CategoryId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageAccess(err) => write!(f, "storage access failed: {err}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::CreatedRowMissing(id) => {
                write!(f, "created category {id} could not be read back")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageAccess(err) => Some(err),
            Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::CreatedRowMissing(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StorageAccess(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageAccess(DbError::Sqlite(value))
    }
}

/// Repository interface for category CRUD operations.
pub trait CategoryRepository {
    /// Returns every category in storage order.
    fn list_all(&self) -> RepoResult<Vec<Category>>;
    /// Returns the category with `id`, or `None` when no row matches.
    fn get_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Inserts a row and returns it re-read under its generated id.
    fn create(&self, draft: &CategoryDraft) -> RepoResult<Category>;
    /// Overwrites name and description of row `id`, if it exists.
    fn update(&self, id: CategoryId, draft: &CategoryDraft) -> RepoResult<()>;
    /// Removes row `id`, if it exists.
    fn delete(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category repository.
///
/// Holds no state besides its provider, so it is `Sync` whenever the
/// provider is.
#[derive(Debug)]
pub struct SqliteCategoryRepository<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteCategoryRepository<P> {
    /// Wraps a provider without checking the schema.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Wraps a provider after checking `Categories` and its columns exist.
    pub fn try_new(provider: P) -> RepoResult<Self> {
        {
            let conn = provider.acquire()?;
            ensure_categories_table(&conn)?;
        }
        Ok(Self { provider })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn run<T>(
        &self,
        event: &'static str,
        op: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let result = self
            .provider
            .acquire()
            .map_err(RepoError::from)
            .and_then(|conn| op(&*conn));

        if let Err(err) = &result {
            error!("event={event} module=repo status=error error={err}");
        }
        result
    }
}

impl<P: ConnectionProvider> CategoryRepository for SqliteCategoryRepository<P> {
    fn list_all(&self) -> RepoResult<Vec<Category>> {
        self.run("category_list", |conn| {
            let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL};"))?;
            let mut rows = stmt.query([])?;
            let mut categories = Vec::new();

            while let Some(row) = rows.next()? {
                categories.push(parse_category_row(row)?);
            }

            debug!(
                "event=category_list module=repo status=ok count={}",
                categories.len()
            );
            Ok(categories)
        })
    }

    fn get_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.run("category_get", |conn| {
            let category = fetch_by_id(conn, id)?;
            debug!(
                "event=category_get module=repo status=ok category_id={id} found={}",
                category.is_some()
            );
            Ok(category)
        })
    }

    fn create(&self, draft: &CategoryDraft) -> RepoResult<Category> {
        self.run("category_create", |conn| {
            conn.execute(
                "INSERT INTO Categories (name, description) VALUES (?1, ?2);",
                params![draft.name.as_deref(), draft.description.as_deref()],
            )?;
            let id = conn.last_insert_rowid();
            debug!("event=category_create module=repo status=ok category_id={id}");

            fetch_by_id(conn, id)?.ok_or(RepoError::CreatedRowMissing(id))
        })
    }

    fn update(&self, id: CategoryId, draft: &CategoryDraft) -> RepoResult<()> {
        self.run("category_update", |conn| {
            let changed = conn.execute(
                "UPDATE Categories
                 SET
                    name = ?1,
                    description = ?2
                 WHERE category_id = ?3;",
                params![draft.name.as_deref(), draft.description.as_deref(), id],
            )?;
            debug!(
                "event=category_update module=repo status=ok category_id={id} rows_affected={changed}"
            );
            Ok(())
        })
    }

    fn delete(&self, id: CategoryId) -> RepoResult<()> {
        self.run("category_delete", |conn| {
            let changed = conn.execute("DELETE FROM Categories WHERE category_id = ?1;", [id])?;
            debug!(
                "event=category_delete module=repo status=ok category_id={id} rows_affected={changed}"
            );
            Ok(())
        })
    }
}

fn fetch_by_id(conn: &Connection, id: CategoryId) -> rusqlite::Result<Option<Category>> {
    let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL} WHERE category_id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_category_row(row)?));
    }

    Ok(None)
}

fn parse_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category::from_parts(
        row.get("category_id")?,
        row.get("name")?,
        row.get("description")?,
    ))
}

fn ensure_categories_table(conn: &Connection) -> RepoResult<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1 COLLATE NOCASE
        );",
        [CATEGORIES_TABLE],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(CATEGORIES_TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({CATEGORIES_TABLE});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    for &required in CATEGORIES_COLUMNS {
        if !columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: CATEGORIES_TABLE,
                column: required,
            });
        }
    }

    Ok(())
}
