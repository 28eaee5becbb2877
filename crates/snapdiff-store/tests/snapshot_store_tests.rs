// Integration tests for the dated snapshot store
// Covers round trip, lenient loads, overwrite semantics and date listing

use chrono::NaiveDate;
use serde_json::json;
use snapdiff_core::model::Collection;
use snapdiff_store::{FixedClock, LoadOutcome, SnapshotStore};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_on(dir: &TempDir, today: NaiveDate) -> SnapshotStore {
    SnapshotStore::with_clock(dir.path(), FixedClock(today))
}

fn sample_collection() -> Collection {
    Collection::from_value(
        json!([
            {"reference": "UX-100", "name": "Walther LGV", "price": {"amount": 249.9, "currency": "EUR"}},
            {"reference": "UX-200", "name": "Cible métal", "tags": ["outdoor", "steel"], "stock": null},
            {"reference": "UX-300", "active": true, "qty": 0}
        ]),
        "test",
    )
    .unwrap()
}

#[test]
fn test_round_trip_same_date() {
    // Given: a store whose clock says 2025-02-14
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 14));
    let collection = sample_collection();

    // When: we save and load the same date
    let stored = store.save("article", &collection).unwrap();
    let loaded = store.load("article", date(2025, 2, 14));

    // Then: both the returned and the loaded form equal the input
    assert_eq!(stored.collection, collection);
    assert_eq!(loaded, collection);
}

#[test]
fn test_file_layout_and_encoding() {
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 17));

    store.save("stock", &sample_collection()).unwrap();

    let path = dir.path().join("stock").join("stock_2025-02-17.json");
    let text = fs::read_to_string(path).unwrap();
    assert!(text.starts_with("[\n    {\n        \"reference\": \"UX-100\""));
    assert!(text.contains("Cible métal"));
}

#[test]
fn test_missing_snapshot_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 14));

    assert!(store.load("article", date(2024, 1, 1)).is_empty());
    assert_eq!(
        store.load_outcome("article", date(2024, 1, 1)),
        LoadOutcome::Missing
    );
}

#[test]
fn test_corrupt_snapshot_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 14));
    let path = store.snapshot_path("article", date(2025, 2, 14)).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"[{\"reference\": \"UX-1\"").unwrap();

    assert!(store.load("article", date(2025, 2, 14)).is_empty());
    assert!(matches!(
        store.load_outcome("article", date(2025, 2, 14)),
        LoadOutcome::Corrupt { .. }
    ));
}

#[test]
fn test_wrong_shape_snapshot_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 14));
    let path = store.snapshot_path("article", date(2025, 2, 14)).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, br#"{"articles": [{"reference": "UX-1"}]}"#).unwrap();

    assert!(store.load("article", date(2025, 2, 14)).is_empty());
    // The raw document is still reachable for envelope extraction
    let doc = store.load_document("article", date(2025, 2, 14));
    assert_eq!(doc["articles"][0]["reference"], json!("UX-1"));
}

#[test]
fn test_resave_same_date_overwrites() {
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 14));

    store.save("stock", &sample_collection()).unwrap();
    let replacement = Collection::from_value(json!([{"ref": "only"}]), "test").unwrap();
    store.save("stock", &replacement).unwrap();

    assert_eq!(store.load("stock", date(2025, 2, 14)), replacement);
    assert_eq!(store.list_dates("stock").unwrap(), vec![date(2025, 2, 14)]);
}

#[test]
fn test_no_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let store = store_on(&dir, date(2025, 2, 14));

    store.save("stock", &sample_collection()).unwrap();
    store.save("stock", &sample_collection()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path().join("stock"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["stock_2025-02-14.json".to_string()]);
}

fn writer_collection(writer: usize, records: usize) -> Collection {
    (0..records)
        .map(|i| {
            json!({"ref": format!("R-{i:04}"), "writer": writer, "label": "x".repeat(64)})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect()
}

#[test]
fn test_concurrent_saves_leave_one_complete_snapshot() {
    // Given: several writers saving the same (dataset, date) at once
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_on(&dir, date(2025, 2, 14)));
    let writers = 8;
    let records = 500;

    let handles: Vec<_> = (0..writers)
        .map(|writer| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let collection = writer_collection(writer, records);
                for _ in 0..5 {
                    store.save("stock", &collection).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Then: the file decodes and holds exactly one writer's full collection
    let loaded = match store.load_outcome("stock", date(2025, 2, 14)) {
        LoadOutcome::Loaded(collection) => collection,
        other => panic!("expected a complete snapshot, got {:?}", other),
    };
    assert_eq!(loaded.len(), records);
    let winner = loaded.records()[0]["writer"].as_u64().unwrap() as usize;
    assert_eq!(loaded, writer_collection(winner, records));

    // And: no temp file survives
    let names: Vec<String> = fs::read_dir(dir.path().join("stock"))
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["stock_2025-02-14.json".to_string()]);
}

#[test]
fn test_list_dates_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    for d in [date(2025, 2, 17), date(2025, 2, 14), date(2025, 3, 1)] {
        store_on(&dir, d).save("article", &Collection::new()).unwrap();
    }
    let stock_dir = dir.path().join("article");
    fs::write(stock_dir.join("notes.txt"), b"ignored").unwrap();
    fs::write(stock_dir.join("stock_2025-01-01.json"), b"[]").unwrap();
    fs::create_dir(stock_dir.join("article_2025-01-02.json")).unwrap();

    let store = store_on(&dir, date(2025, 3, 1));
    assert_eq!(
        store.list_dates("article").unwrap(),
        vec![date(2025, 2, 14), date(2025, 2, 17), date(2025, 3, 1)]
    );
    assert!(store.list_dates("stock").unwrap().is_empty());
}

#[test]
fn test_save_into_unwritable_location_fails() {
    let dir = TempDir::new().unwrap();
    // A plain file where the store root should be
    let root = dir.path().join("root");
    fs::write(&root, b"").unwrap();
    let store = SnapshotStore::with_clock(&root, FixedClock(date(2025, 2, 14)));

    let err = store.save("stock", &Collection::new()).unwrap_err();
    assert_eq!(err.code(), "ERR_PERSISTENCE");
    assert_eq!(err.dataset(), Some("stock"));
}
