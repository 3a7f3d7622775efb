use chrono::NaiveDate;
use roster_core::db::migrations::latest_version;
use roster_core::db::{open_db, open_db_in_memory, DbError};
use roster_core::{
    RepoError, RosterConfig, RosterService, SlotRosterRepository, SlotStore, SqliteSlotStore,
    Student, StudentPatch, DEFAULT_SLOT_KEY,
};
use rusqlite::Connection;

fn student(id: &str, gpa: f64) -> Student {
    let birth_date = NaiveDate::from_ymd_opt(2001, 12, 31).unwrap();
    Student::new(id, format!("Student {id}"), birth_date, "K15", gpa)
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_slots');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(err.to_string().contains("schema v999"), "unexpected message: {err}");
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
}

#[test]
fn slot_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSlotStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn slot_store_rejects_connection_without_slot_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteSlotStore::try_new(&conn),
        Err(RepoError::MissingRequiredTable("kv_slots"))
    ));
}

#[test]
fn slot_write_replaces_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSlotStore::try_new(&conn).unwrap();

    assert_eq!(store.read_slot("k").unwrap(), None);
    store.write_slot("k", "first").unwrap();
    store.write_slot("k", "second").unwrap();
    store.write_slot("other", "x").unwrap();

    assert_eq!(store.read_slot("k").unwrap().as_deref(), Some("second"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn roster_round_trips_through_sqlite_in_order() {
    let conn = open_db_in_memory().unwrap();
    let originals = (1..=5)
        .map(|n| student(&format!("SV{n:02}"), f64::from(n) * 0.75))
        .collect::<Vec<_>>();

    {
        let store = SqliteSlotStore::try_new(&conn).unwrap();
        let mut roster = RosterService::open(SlotRosterRepository::new(store)).unwrap();
        for item in originals.iter().rev() {
            roster.add(item.clone()).unwrap();
        }
    }

    let store = SqliteSlotStore::try_new(&conn).unwrap();
    let reopened = RosterService::open(SlotRosterRepository::new(store)).unwrap();
    let expected = originals.into_iter().rev().collect::<Vec<_>>();
    assert_eq!(reopened.students(), expected.as_slice());
}

#[test]
fn reopening_file_database_sees_previous_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let config = RosterConfig {
        db_path: dir.path().join("roster.sqlite3"),
        ..RosterConfig::default()
    };

    {
        let conn = config.open_connection().unwrap();
        let store = SqliteSlotStore::try_new(&conn).unwrap();
        let mut roster = RosterService::open(SlotRosterRepository::with_key(
            store,
            config.slot_key.as_str(),
        ))
        .unwrap();
        roster.add(student("SV01", 3.8)).unwrap();
        roster.add(student("SV02", 2.2)).unwrap();
        roster.remove("SV02").unwrap();
        roster
            .update(
                "SV01",
                StudentPatch {
                    gpa: Some(3.4),
                    ..StudentPatch::default()
                },
            )
            .unwrap();
    }

    let conn = config.open_connection().unwrap();
    let store = SqliteSlotStore::try_new(&conn).unwrap();
    let raw = store.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));

    let roster = RosterService::open(SlotRosterRepository::new(store)).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.find_by_id("SV01").unwrap().gpa(), 3.4);
}
