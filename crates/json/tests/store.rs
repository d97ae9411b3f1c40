//! Tests for the file-backed store contract.

use hcore::{Draft, Payload, Store, StoreError};
use hindsight_json::JsonStore;
use serde_json::json;

fn payload(label: &str) -> Payload {
    let mut map = Payload::new();
    map.insert("content".into(), json!(label));
    map
}

fn draft(embedding: Vec<f32>, label: &str) -> Draft {
    Draft {
        embedding,
        payload: payload(label),
    }
}

fn label(p: &Payload) -> &str {
    p["content"].as_str().unwrap()
}

#[tokio::test]
async fn search_orders_by_similarity() {
    let store = JsonStore::in_memory();
    store
        .insert(vec![
            draft(vec![1.0, 0.0], "exact"),
            draft(vec![0.0, 1.0], "orthogonal"),
            draft(vec![0.9, 0.1], "close"),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0], 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(label(&results[0]), "exact");
    assert_eq!(label(&results[1]), "close");
}

#[tokio::test]
async fn search_saturates_to_store_size() {
    let store = JsonStore::in_memory();
    store
        .insert(vec![
            draft(vec![1.0, 0.0], "a"),
            draft(vec![0.5, 0.5], "b"),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(label(&results[0]), "a");
}

#[tokio::test]
async fn search_on_empty_store_returns_nothing() {
    let store = JsonStore::in_memory();
    let results = store.search(&[1.0, 0.0], 3).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn ties_break_by_insertion_order() {
    let store = JsonStore::in_memory();
    store
        .insert(vec![
            draft(vec![1.0, 0.0], "first"),
            draft(vec![2.0, 0.0], "second"),
        ])
        .await
        .unwrap();

    // Both are perfectly aligned with the query; the earlier insert wins.
    let results = store.search(&[1.0, 0.0], 2).await.unwrap();
    assert_eq!(label(&results[0]), "first");
    assert_eq!(label(&results[1]), "second");
}

#[tokio::test]
async fn zero_magnitude_records_rank_last() {
    let store = JsonStore::in_memory();
    store
        .insert(vec![
            draft(vec![0.0, 0.0], "null"),
            draft(vec![1.0, 0.0], "aligned"),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0], 2).await.unwrap();
    assert_eq!(label(&results[0]), "aligned");
    assert_eq!(label(&results[1]), "null");
}

#[tokio::test]
async fn dimension_mismatch_rejected_and_store_unchanged() {
    let store = JsonStore::in_memory();
    store
        .insert(vec![draft(vec![1.0, 0.0], "a")])
        .await
        .unwrap();

    let err = store
        .insert(vec![draft(vec![1.0, 0.0, 0.0], "b")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DimensionMismatch {
            expected: 2,
            got: 3
        }
    ));
    assert_eq!(store.len(), 1);

    let results = store.search(&[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(label(&results[0]), "a");
}

#[tokio::test]
async fn mismatch_within_first_batch_rejected() {
    let store = JsonStore::in_memory();
    let err = store
        .insert(vec![
            draft(vec![1.0, 0.0], "a"),
            draft(vec![1.0], "b"),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DimensionMismatch { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn insert_returns_one_id_per_draft() {
    let store = JsonStore::in_memory();
    let ids = store
        .insert(vec![
            draft(vec![1.0, 0.0], "a"),
            draft(vec![0.0, 1.0], "b"),
        ])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.json");

    let store = JsonStore::open(&path).unwrap();
    store
        .insert(vec![
            draft(vec![1.0, 0.0], "exact"),
            draft(vec![0.0, 1.0], "orthogonal"),
            draft(vec![0.9, 0.1], "close"),
        ])
        .await
        .unwrap();
    let before = store.search(&[1.0, 0.0], 3).await.unwrap();
    drop(store);

    let reloaded = JsonStore::open(&path).unwrap();
    assert_eq!(reloaded.len(), 3);
    let after = reloaded.search(&[1.0, 0.0], 3).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("absent.json")).unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn reloaded_store_keeps_dimensionality() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.json");

    let store = JsonStore::open(&path).unwrap();
    store
        .insert(vec![draft(vec![1.0, 0.0], "a")])
        .await
        .unwrap();
    drop(store);

    let reloaded = JsonStore::open(&path).unwrap();
    let err = reloaded
        .insert(vec![draft(vec![1.0, 0.0, 0.0], "b")])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DimensionMismatch { .. }));
}
