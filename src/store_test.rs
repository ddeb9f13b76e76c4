use super::*;

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert_eq!(store.get().unwrap(), None);
    assert!(!is_logged_in(&store).unwrap());
}

#[test]
fn memory_store_set_then_clear() {
    let store = MemoryStore::new();
    store.set("abc").unwrap();
    assert_eq!(store.get().unwrap().as_deref(), Some("abc"));
    assert!(is_logged_in(&store).unwrap());

    store.clear().unwrap();
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn empty_token_counts_as_logged_out() {
    let store = MemoryStore::with_token("");
    assert!(!is_logged_in(&store).unwrap());
}

#[test]
fn arc_store_shares_state() {
    let store = Arc::new(MemoryStore::new());
    let other = Arc::clone(&store);
    other.set("shared").unwrap();
    assert_eq!(SessionStore::get(&store).unwrap().as_deref(), Some("shared"));
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));
    assert_eq!(store.get().unwrap(), None);
    store.clear().unwrap();
    assert!(!store.path().exists());
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    FileStore::new(&path).set("tok-1").unwrap();
    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get().unwrap().as_deref(), Some("tok-1"));
}

#[test]
fn file_store_clear_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, r#"{"theme":"dark","access_token":"tok"}"#).unwrap();

    let store = FileStore::new(&path);
    store.clear().unwrap();
    assert_eq!(store.get().unwrap(), None);

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["theme"], "dark");
    assert!(raw.get(ACCESS_TOKEN_KEY).is_none());
}

#[test]
fn file_store_non_string_token_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, r#"{"access_token":42}"#).unwrap();
    assert_eq!(FileStore::new(&path).get().unwrap(), None);
}

#[test]
fn file_store_rejects_non_object_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1,2,3]").unwrap();

    let err = FileStore::new(&path).get().unwrap_err();
    assert!(matches!(err, ClientError::Storage(_)));
}
