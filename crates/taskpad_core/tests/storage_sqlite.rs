use taskpad_core::storage::latest_version;
use taskpad_core::{
    decode_tasks, PersistenceAdapter, SqliteKeyValueStorage, TaskStore, STORAGE_KEY,
};

#[test]
fn latest_migration_version_is_positive() {
    assert!(latest_version() > 0);
}

#[test]
fn get_returns_none_for_unset_key() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn set_then_get_round_trips() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();

    storage.set(STORAGE_KEY, "[]").unwrap();
    assert_eq!(storage.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn set_overwrites_prior_value() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();

    storage.set(STORAGE_KEY, "stale").unwrap();
    storage.set(STORAGE_KEY, "latest").unwrap();

    assert_eq!(storage.get(STORAGE_KEY).unwrap().as_deref(), Some("latest"));
}

#[test]
fn keys_are_independent() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();

    storage.set("@task", "a").unwrap();
    storage.set("@task.corrupt", "b").unwrap();

    assert_eq!(storage.get("@task").unwrap().as_deref(), Some("a"));
    assert_eq!(storage.get("@task.corrupt").unwrap().as_deref(), Some("b"));
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("taskpad.sqlite3");

    {
        let storage = SqliteKeyValueStorage::open(&db_path).unwrap();
        storage.set(STORAGE_KEY, r#"[{"id":"X","task":"X"}]"#).unwrap();
    }

    let reopened = SqliteKeyValueStorage::open(&db_path).unwrap();
    assert_eq!(
        reopened.get(STORAGE_KEY).unwrap().as_deref(),
        Some(r#"[{"id":"X","task":"X"}]"#)
    );
}

#[test]
fn reopen_with_applied_migrations_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("taskpad.sqlite3");

    SqliteKeyValueStorage::open(&db_path).unwrap();
    SqliteKeyValueStorage::open(&db_path).unwrap();
}

#[test]
fn task_list_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("taskpad.sqlite3");

    {
        let storage = SqliteKeyValueStorage::open(&db_path).unwrap();
        let mut store = TaskStore::hydrate(storage);
        store.add("survives restart");
        // Dropping the store drains the writer before the file closes.
    }

    let storage = SqliteKeyValueStorage::open(&db_path).unwrap();
    let payload = storage.get(STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_tasks(&payload).unwrap()[0].text, "survives restart");

    let store = TaskStore::hydrate(storage);
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].text, "survives restart");
}
