use super::*;
use crate::storage::InMemoryStorage;

fn record(id: i64, ship_number: &str) -> Record {
    Record {
        id,
        ship_number: ship_number.to_string(),
        damage: "N".to_string(),
        year: 2023,
        ..Record::default()
    }
}

fn patch(ship_number: &str) -> RecordPatch {
    RecordPatch {
        ship_number: Some(ship_number.to_string()),
        ..RecordPatch::default()
    }
}

fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

#[test]
fn empty_mirror_loads_as_empty_set() {
    let mirror = LocalMirror::new(InMemoryStorage::new());
    assert!(mirror.load().unwrap().is_empty());
    assert!(!mirror.has_unsynced_edits().unwrap());
}

#[test]
fn replace_all_round_trips_records() {
    let mirror = LocalMirror::new(InMemoryStorage::new());
    let records = vec![record(2, "S-2"), record(1, "S-1")];

    assert_eq!(mirror.replace_all(&records).unwrap(), None);
    assert_eq!(mirror.load().unwrap(), records);
}

#[test]
fn reads_snapshots_with_missing_fields() {
    let storage = InMemoryStorage::new();
    storage
        .write(MIRROR_KEY, r#"[{"id": 4, "ship_number": "S-4", "damage": "Y"}]"#)
        .unwrap();

    let records = LocalMirror::new(storage).load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 4);
    assert_eq!(records[0].manhour_spent, 0.0);
    assert_eq!(records[0].issuance_date, "");
    assert!(records[0].has_damage());
}

#[test]
fn corrupt_snapshots_are_reported() {
    let storage = InMemoryStorage::new();
    storage.write(MIRROR_KEY, "{not json").unwrap();

    match LocalMirror::new(storage).load() {
        Err(crate::record_store::StoreError::CorruptMirror { .. }) => (),
        other => panic!("Must report corrupt mirrors, got {:?}", other),
    }
}

#[test]
fn insert_assigns_increasing_ids_and_defaults() {
    let mut mirror = LocalMirror::new(InMemoryStorage::new());
    mirror
        .replace_all(&[record(7, "S-7"), record(3, "S-3")])
        .unwrap();

    mirror.insert(&[patch("S-new")]).unwrap();
    let records = mirror.select_all().unwrap();
    assert_eq!(ids(&records), vec![8, 7, 3]);
    assert_eq!(records[0].damage, "N");
    assert_eq!(records[0].year, chrono::Local::now().year());
}

#[test]
fn insert_keeps_explicit_values_and_ignores_client_ids() {
    let mut mirror = LocalMirror::new(InMemoryStorage::new());
    let mut row = patch("S-1");
    row.id = Some(77);
    row.year = Some(2019);
    row.damage = Some("Y".to_string());

    mirror.insert(&[row]).unwrap();
    let records = mirror.select_all().unwrap();
    assert_eq!(ids(&records), vec![1]);
    assert_eq!(records[0].year, 2019);
    assert_eq!(records[0].damage, "Y");
}

#[test]
fn batch_insert_prepends_in_input_order() {
    let mut mirror = LocalMirror::new(InMemoryStorage::new());
    mirror.replace_all(&[record(5, "S-5")]).unwrap();

    assert_eq!(
        mirror
            .insert(&[patch("A"), patch("B"), patch("C")])
            .unwrap(),
        3
    );
    let records = mirror.select_all().unwrap();
    assert_eq!(ids(&records), vec![6, 7, 8, 5]);
    assert_eq!(records[0].ship_number, "A");
    assert_eq!(records[2].ship_number, "C");
}

#[test]
fn update_merges_fields() {
    let mut mirror = LocalMirror::new(InMemoryStorage::new());
    mirror
        .replace_all(&[record(2, "S-2"), record(1, "S-1")])
        .unwrap();

    let changed = mirror
        .update(
            1,
            &RecordPatch {
                team: Some("Piping".to_string()),
                ..RecordPatch::default()
            },
        )
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(mirror.update(99, &patch("S-99")).unwrap(), 0);

    let records = mirror.select_all().unwrap();
    assert_eq!(records[1].team, "Piping");
    assert_eq!(records[1].ship_number, "S-1");
    assert_eq!(records[0].team, "");
}

#[test]
fn delete_removes_records() {
    let mut mirror = LocalMirror::new(InMemoryStorage::new());
    mirror
        .replace_all(&[record(2, "S-2"), record(1, "S-1")])
        .unwrap();

    assert_eq!(mirror.delete(2).unwrap(), 1);
    assert_eq!(mirror.delete(2).unwrap(), 0);
    assert_eq!(ids(&mirror.select_all().unwrap()), vec![1]);
}

#[test]
fn local_edits_are_archived_on_replace() {
    let storage = InMemoryStorage::new();
    let mut mirror = LocalMirror::new(storage.clone());
    mirror.replace_all(&[record(1, "S-1")]).unwrap();
    assert!(!mirror.has_unsynced_edits().unwrap());

    mirror.insert(&[patch("offline")]).unwrap();
    assert!(mirror.has_unsynced_edits().unwrap());

    let archive_key = mirror
        .replace_all(&[record(1, "S-1")])
        .unwrap()
        .expect("Must archive local-only edits.");
    assert!(!mirror.has_unsynced_edits().unwrap());
    assert_eq!(mirror.archived_snapshots().unwrap(), vec![archive_key.clone()]);

    let archived: Vec<Record> =
        serde_json::from_str(&storage.read(&archive_key).unwrap().unwrap()).unwrap();
    assert_eq!(ids(&archived), vec![2, 1]);
    assert_eq!(ids(&mirror.load().unwrap()), vec![1]);
}

#[test]
fn marker_is_never_left_on_fetched_records() {
    let storage = InMemoryStorage::new();
    let mut mirror = LocalMirror::new(storage.clone());
    mirror.replace_all(&[record(1, "S-1")]).unwrap();
    mirror.insert(&[patch("offline")]).unwrap();

    // Clearing the marker fails, the fetched set must not be written under it.
    storage.test_set_fail_removes(true);
    assert!(mirror.replace_all(&[record(5, "S-5")]).is_err());
    assert!(mirror.has_unsynced_edits().unwrap());
    assert_eq!(ids(&mirror.load().unwrap()), vec![2, 1]);

    storage.test_set_fail_removes(false);
    let archive_key = mirror
        .replace_all(&[record(5, "S-5")])
        .unwrap()
        .expect("Must archive local-only edits.");
    let archived: Vec<Record> =
        serde_json::from_str(&storage.read(&archive_key).unwrap().unwrap()).unwrap();
    assert_eq!(ids(&archived), vec![2, 1]);
    assert_eq!(ids(&mirror.load().unwrap()), vec![5]);
    assert!(!mirror.has_unsynced_edits().unwrap());
}

#[test]
fn failed_writes_leave_the_mirror_untouched() {
    let storage = InMemoryStorage::new();
    let mut mirror = LocalMirror::new(storage.clone());
    mirror.replace_all(&[record(1, "S-1")]).unwrap();

    storage.test_set_fail_writes(true);
    assert!(mirror.insert(&[patch("S-2")]).is_err());
    assert_eq!(ids(&mirror.load().unwrap()), vec![1]);
}

#[test]
fn next_id_rules() {
    assert_eq!(next_id(&[]), 1);
    assert_eq!(next_id(&[record(3, "a"), record(9, "b"), record(4, "c")]), 10);
}

#[test]
fn empty_batches_are_no_local_edits() {
    let mut mirror = LocalMirror::new(InMemoryStorage::new());
    mirror.replace_all(&[record(1, "S-1")]).unwrap();

    assert_eq!(mirror.insert(&[]).unwrap(), 0);
    assert!(!mirror.has_unsynced_edits().unwrap());
}
