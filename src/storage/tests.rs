use super::*;

fn exercise_storage<S: Storage>(storage: &S) {
    assert_eq!(storage.read("theme").unwrap(), None);

    storage.write("theme", "frost").unwrap();
    assert_eq!(storage.read("theme").unwrap(), Some("frost".to_string()));

    storage.write("theme", "oceanic").unwrap();
    assert_eq!(storage.read("theme").unwrap(), Some("oceanic".to_string()));

    storage.write("pdr_records", "[]").unwrap();
    assert_eq!(
        storage.keys().unwrap(),
        vec!["pdr_records".to_string(), "theme".to_string()]
    );

    storage.remove("theme").unwrap();
    storage.remove("theme").unwrap();
    assert_eq!(storage.read("theme").unwrap(), None);
}

#[test]
fn dir_storage_slots() {
    let test_dir = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(test_dir.path()).unwrap();

    assert!(
        test_dir.path().join(METADATA_DIR).is_dir(),
        "Must have created a special metadata folder."
    );
    exercise_storage(&storage);
}

#[test]
fn dir_storage_reopens_existing_slots() {
    let test_dir = tempfile::tempdir().unwrap();
    DirStorage::open(test_dir.path())
        .unwrap()
        .write("pdr_records", "[{\"id\":1}]")
        .unwrap();

    let storage = DirStorage::open(test_dir.path()).unwrap();
    assert_eq!(
        storage.read("pdr_records").unwrap(),
        Some("[{\"id\":1}]".to_string())
    );
}

#[test]
fn in_memory_storage_slots() {
    exercise_storage(&InMemoryStorage::new());
}

#[test]
fn in_memory_storage_clones_share_slots() {
    let storage = InMemoryStorage::new();
    let handle = storage.clone();

    storage.write("theme", "industrial").unwrap();
    assert_eq!(handle.read("theme").unwrap(), Some("industrial".to_string()));
}

#[test]
fn in_memory_storage_write_failures() {
    let storage = InMemoryStorage::new();
    storage.write("theme", "frost").unwrap();

    storage.test_set_fail_writes(true);
    assert!(storage.write("theme", "aurora").is_err());
    assert_eq!(storage.read("theme").unwrap(), Some("frost".to_string()));
}

#[test]
fn rejects_path_like_keys() {
    let storage = InMemoryStorage::new();
    assert!(storage.write("../escape", "x").is_err());
    assert!(storage.write("", "x").is_err());

    let test_dir = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(test_dir.path()).unwrap();
    assert!(storage.read("sub/key").is_err());
}
