use catalog_core::db::schema::{current_user_version, latest_version};
use catalog_core::db::{open_db, open_db_in_memory, DbError};
use catalog_core::{
    CategoryDraft, CategoryRepository, SqliteCategoryRepository, SqliteConnectionProvider,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "Categories");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO Categories (name) VALUES ('kept');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn_second).unwrap(), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM Categories;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn externally_created_table_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("external.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE Categories (
            category_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            description TEXT
        );
        INSERT INTO Categories (name, description) VALUES ('Produce', 'Fresh fruit & veg');",
    )
    .unwrap();
    drop(conn);

    let provider = SqliteConnectionProvider::open(&path).unwrap();
    let repo = SqliteCategoryRepository::try_new(provider).unwrap();

    let existing = repo.get_by_id(1).unwrap().unwrap();
    assert_eq!(existing.name(), Some("Produce"));

    let created = repo.create(&CategoryDraft::new("Dairy", "Milk")).unwrap();
    assert_eq!(created.category_id(), 2);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "catalog schema version 999 was written by a newer build; \
             this build understands up to version {}",
            latest_version()
        )
    );
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        SqliteConnectionProvider::open(&path),
        Err(DbError::UnsupportedSchemaVersion { .. })
    ));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
