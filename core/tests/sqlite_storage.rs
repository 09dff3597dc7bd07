//! SQLite storage backend tests.

use chrono::Utc;
use quicklife_core::{
    error::SaveError,
    storage::{KeyValueStorage, SqliteStorage},
};

fn build(origin: &str) -> SqliteStorage {
    let storage = SqliteStorage::in_memory(origin).expect("in-memory storage");
    storage.migrate().expect("migration");
    storage
}

/// get / set / remove behave like browser local storage.
#[test]
fn basic_operations() {
    let mut storage = build("app");

    assert_eq!(storage.get("k").unwrap(), None);
    storage.set("k", "one").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("one"));
    storage.set("k", "two").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    assert_eq!(storage.key_count().unwrap(), 1, "Overwrite must not add a row");

    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
    storage.remove("k").expect("removing an absent key is fine");
}

/// Migrations can run more than once.
#[test]
fn migrate_is_repeatable() {
    let storage = build("app");
    storage.migrate().expect("second migration");
}

/// Origins sharing one database do not see each other's keys.
#[test]
fn origins_are_isolated() {
    let path = std::env::temp_dir().join(format!("quicklife-origins-{}.db", std::process::id()));
    let path_str = path.to_str().unwrap().to_string();

    let mut a = SqliteStorage::open(&path_str, "site-a").unwrap();
    a.migrate().unwrap();
    let mut b = SqliteStorage::open(&path_str, "site-b").unwrap();

    a.set("quicklife_save", "from a").unwrap();
    let b_before = b.get("quicklife_save").unwrap();
    b.set("quicklife_save", "from b").unwrap();
    let a_after = a.get("quicklife_save").unwrap();
    b.remove("quicklife_save").unwrap();
    let a_final = a.get("quicklife_save").unwrap();

    drop(a);
    drop(b);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));

    assert_eq!(b_before, None);
    assert_eq!(a_after.as_deref(), Some("from a"));
    assert_eq!(a_final.as_deref(), Some("from a"));
}

/// last_updated tracks the most recent write.
#[test]
fn last_updated_is_recorded() {
    let mut storage = build("app");
    assert_eq!(storage.last_updated("k").unwrap(), None);

    let before = Utc::now();
    storage.set("k", "v").unwrap();
    let stamp = storage.last_updated("k").unwrap().expect("timestamp");
    assert!(stamp >= before - chrono::Duration::seconds(1));
    assert!(stamp <= Utc::now() + chrono::Duration::seconds(1));
}

/// Quota counts bytes, not characters, and ignores the value being replaced.
#[test]
fn quota_is_enforced_in_bytes() {
    let mut storage = build("app").with_quota(Some(12));

    storage.set("k", "ééééé").unwrap(); // 1 + 10 bytes
    storage.set("k", "12345678901").unwrap(); // replaces, still 12 bytes
    let err = storage.set("k", "ééééééé").unwrap_err();
    assert!(matches!(err, SaveError::QuotaExceeded { .. }), "got {err}");
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("12345678901"));

    let err = storage.set("other", "x").unwrap_err();
    assert!(matches!(err, SaveError::QuotaExceeded { .. }), "got {err}");
}
