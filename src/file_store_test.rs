use std::fs;

use tempfile::TempDir;

use super::*;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().join("board.json"))
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.get("solidifyCanvas").is_none());
    assert!(!store.path().exists());
}

#[test]
fn set_then_get_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.set("k", "{\"a\":{}}").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("{\"a\":{}}"));
}

#[test]
fn values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).set("k", "v").unwrap();
    assert_eq!(store_in(&dir).get("k").as_deref(), Some("v"));
}

#[test]
fn set_keeps_other_keys() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.set("a", "3").unwrap();
    assert_eq!(store.get("a").as_deref(), Some("3"));
    assert_eq!(store.get("b").as_deref(), Some("2"));
}

#[test]
fn file_is_a_json_object_of_strings() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.set("solidifyCanvas", "{}").unwrap();
    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({ "solidifyCanvas": "{}" }));
}

#[test]
fn no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.set("k", "v").unwrap();
    let names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names, vec![std::ffi::OsString::from("board.json")]);
}

#[test]
fn creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path().join("nested/deeper/board.json"));
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn empty_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "  \n").unwrap();
    assert!(store.get("k").is_none());
}

#[test]
fn corrupt_file_reads_as_empty_but_refuses_writes() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    fs::write(store.path(), "not json").unwrap();

    assert!(store.get("k").is_none());
    let err = store.set("k", "v").unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "not json");
}
