use calendar_core::db::{open_db, open_db_in_memory};
use calendar_core::{KeyValueStore, SqliteKeyValueStore};

#[test]
fn sqlite_store_reads_missing_key_as_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    assert_eq!(store.get("calendar_events").unwrap(), None);
}

#[test]
fn sqlite_store_overwrites_whole_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("calendar_events", "[1,2,3]").unwrap();
    store.set("calendar_events", "[]").unwrap();

    assert_eq!(store.get("calendar_events").unwrap().as_deref(), Some("[]"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_store_keeps_keys_independent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set("calendar_events", "[]").unwrap();
    store.set("other_slot", "[1]").unwrap();

    assert_eq!(store.get("calendar_events").unwrap().as_deref(), Some("[]"));
    assert_eq!(store.get("other_slot").unwrap().as_deref(), Some("[1]"));
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteKeyValueStore::new(&conn).set("k", "persisted").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    assert_eq!(store.get("k").unwrap().as_deref(), Some("persisted"));
}
