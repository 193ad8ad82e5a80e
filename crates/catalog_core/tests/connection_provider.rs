use catalog_core::db::open_db_in_memory;
use catalog_core::{
    CategoryDraft, CategoryRepository, ConnectionProvider, DbResult, ScopedConnection,
    SqliteCategoryRepository, SqliteConnectionProvider,
};
use std::sync::Arc;

/// Hands out a brand-new private database on every call.
struct FreshDatabaseProvider;

impl ConnectionProvider for FreshDatabaseProvider {
    fn acquire(&self) -> DbResult<ScopedConnection> {
        Ok(ScopedConnection::new(open_db_in_memory()?))
    }
}

#[test]
fn each_operation_uses_its_own_connection() {
    let repo = SqliteCategoryRepository::try_new(FreshDatabaseProvider).unwrap();

    let created = repo.create(&CategoryDraft::new("Produce", "Fresh")).unwrap();
    assert_eq!(created.category_id(), 1);

    assert!(repo.get_by_id(created.category_id()).unwrap().is_none());
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn file_provider_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite3");

    let created = {
        let provider = SqliteConnectionProvider::open(&path).unwrap();
        assert_eq!(provider.path(), Some(path.as_path()));
        let repo = SqliteCategoryRepository::try_new(provider).unwrap();
        repo.create(&CategoryDraft::new("Seafood", "Fish")).unwrap()
    };

    let repo = SqliteCategoryRepository::try_new(SqliteConnectionProvider::open(&path).unwrap())
        .unwrap();
    assert_eq!(repo.get_by_id(created.category_id()).unwrap(), Some(created));
}

#[test]
fn repositories_sharing_a_provider_see_the_same_rows() {
    let provider = Arc::new(SqliteConnectionProvider::in_memory().unwrap());
    let writer = SqliteCategoryRepository::try_new(Arc::clone(&provider)).unwrap();
    let reader = SqliteCategoryRepository::try_new(Arc::clone(&provider)).unwrap();

    let created = writer.create(&CategoryDraft::new("Deli", "Cold cuts")).unwrap();
    assert_eq!(reader.list_all().unwrap(), vec![created.clone()]);

    writer.delete(created.category_id()).unwrap();
    assert!(reader.get_by_id(created.category_id()).unwrap().is_none());
}
