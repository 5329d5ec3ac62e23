use std::fs;

use jobscan_engine::{
    AtomicFile, JsonFileStore, KeyValueStore, KeywordStore, MemoryStore, KEYWORDS_KEY,
};
use tempfile::TempDir;

fn init_logging() {
    jobscan_logging::initialize_for_tests();
}

fn file_store(dir: &TempDir) -> KeywordStore<JsonFileStore> {
    KeywordStore::new(JsonFileStore::new(AtomicFile::new(
        dir.path().join("state").join("jobscan.json"),
    )))
}

#[test]
fn keywords_round_trip_preserving_order() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    let keywords = vec![
        "visa".to_string(),
        "Remote".to_string(),
        "relocation package".to_string(),
    ];

    store.save(&keywords).unwrap();
    assert_eq!(store.load(), keywords);

    // A fresh store over the same file sees the same list.
    assert_eq!(file_store(&temp).load(), keywords);
}

#[test]
fn missing_file_loads_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    assert!(file_store(&temp).load().is_empty());
}

#[test]
fn value_is_json_encoded_under_single_key() {
    init_logging();
    let store = KeywordStore::new(MemoryStore::new());
    store.save(&["a".to_string(), "b".to_string()]).unwrap();
    assert_eq!(
        store.inner().get(KEYWORDS_KEY).unwrap().as_deref(),
        Some(r#"["a","b"]"#)
    );
}

#[test]
fn malformed_value_loads_empty() {
    init_logging();
    for raw in ["not json", r#"{"a":1}"#, "[1,2,3]", r#"["ok", 5]"#] {
        let memory = MemoryStore::new();
        memory.set(KEYWORDS_KEY, raw.to_string()).unwrap();
        let store = KeywordStore::new(memory);
        assert!(store.load().is_empty(), "{raw} should load as empty");
    }
}

#[test]
fn corrupt_store_file_loads_empty_and_is_replaced_on_save() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("jobscan.json");
    fs::write(&path, "{{{ definitely not json").unwrap();
    let store = KeywordStore::new(JsonFileStore::new(AtomicFile::new(&path)));

    assert!(store.load().is_empty());

    store.save(&["remote".to_string()]).unwrap();
    assert_eq!(store.load(), vec!["remote".to_string()]);
}

#[test]
fn other_keys_survive_keyword_writes() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let backing = JsonFileStore::new(AtomicFile::new(temp.path().join("jobscan.json")));
    backing.set("theme", "dark".to_string()).unwrap();

    let store = KeywordStore::new(backing);
    store.save(&["remote".to_string()]).unwrap();
    assert_eq!(
        store.inner().get("theme").unwrap().as_deref(),
        Some("dark")
    );
}

#[test]
fn write_into_file_path_parent_fails() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();

    let store = KeywordStore::new(JsonFileStore::new(AtomicFile::new(
        not_a_dir.join("jobscan.json"),
    )));
    assert!(store.save(&["remote".to_string()]).is_err());
}
