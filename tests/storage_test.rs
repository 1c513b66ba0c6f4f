//! Visited landmark persistence over both KeyValueStore backends

use std::sync::Arc;

use landmark_quest::db;
use landmark_quest::domain::{KeyValueStore, StoredLandmark};
use landmark_quest::infrastructure::{MemoryKeyValueStore, SeaOrmKeyValueStore};
use landmark_quest::services::VisitedLandmarkService;

// Helper to create a SQLite-backed store
async fn setup_sqlite_store() -> Arc<SeaOrmKeyValueStore> {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    Arc::new(SeaOrmKeyValueStore::new(db))
}

fn stored(id: &str, name: &str) -> StoredLandmark {
    StoredLandmark {
        id: id.to_string(),
        name: name.to_string(),
        latitude: 35.0116,
        longitude: 135.7681,
        genre_code: Some("0305".to_string()),
        color: Some("#2E8B57".to_string()),
    }
}

#[tokio::test]
async fn test_sqlite_store_get_set_overwrite() {
    let store = setup_sqlite_store().await;

    assert_eq!(store.get("missing").await.unwrap(), None);

    store.set("greeting", "hello").await.unwrap();
    assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hello"));

    store.set("greeting", "konnichiwa").await.unwrap();
    assert_eq!(
        store.get("greeting").await.unwrap().as_deref(),
        Some("konnichiwa")
    );
}

#[tokio::test]
async fn test_empty_store_loads_empty_state() {
    let service = VisitedLandmarkService::new(Arc::new(MemoryKeyValueStore::new()));

    assert!(service.load_visited().await.unwrap().is_empty());
    assert!(service.load_details().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_visited_is_idempotent() {
    let store = setup_sqlite_store().await;
    let service = VisitedLandmarkService::new(store.clone());

    let once = service.add_visited("shrine-1").await.unwrap();
    let twice = service.add_visited("shrine-1").await.unwrap();
    assert_eq!(once.len(), 1);
    assert_eq!(twice.len(), once.len());

    let raw = store.get("visited_landmarks").await.unwrap().unwrap();
    assert_eq!(raw, r#"["shrine-1"]"#);
}

#[tokio::test]
async fn test_save_of_load_is_idempotent() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let service = VisitedLandmarkService::new(store.clone());

    service.add_visited("b").await.unwrap();
    service.add_visited("a").await.unwrap();
    let before = store.get("visited_landmarks").await.unwrap();

    let loaded = service.load_visited().await.unwrap();
    service.save_visited(&loaded).await.unwrap();
    service.save_visited(&service.load_visited().await.unwrap()).await.unwrap();

    assert_eq!(store.get("visited_landmarks").await.unwrap(), before);
    assert_eq!(service.load_visited().await.unwrap(), loaded);
}

#[tokio::test]
async fn test_corrupt_data_falls_back_to_empty() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set("visited_landmarks", "{not json").await.unwrap();
    store.set("visited_landmarks_details", r#"{"id": 1}"#).await.unwrap();

    let service = VisitedLandmarkService::new(store.clone());
    assert!(service.load_visited().await.unwrap().is_empty());
    assert!(service.load_details().await.unwrap().is_empty());

    // Adding after corruption starts a fresh set
    let visited = service.add_visited("temple-9").await.unwrap();
    assert_eq!(visited.len(), 1);
    assert_eq!(
        store.get("visited_landmarks").await.unwrap().as_deref(),
        Some(r#"["temple-9"]"#)
    );
}

#[tokio::test]
async fn test_details_upsert_keeps_latest_record() {
    let store = setup_sqlite_store().await;
    let service = VisitedLandmarkService::new(store);

    service
        .add_visited_with_details(stored("castle", "Nijo"))
        .await
        .unwrap();
    service
        .add_visited_with_details(stored("garden", "Shinsen-en"))
        .await
        .unwrap();
    let snapshot = service
        .add_visited_with_details(stored("castle", "Nijo Castle"))
        .await
        .unwrap();

    assert_eq!(snapshot.visited.len(), 2);
    assert_eq!(snapshot.landmarks.len(), 2);

    let details = service.load_details().await.unwrap();
    let castles: Vec<_> = details.iter().filter(|l| l.id == "castle").collect();
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].name, "Nijo Castle");
    // replaced in place, insertion order kept
    assert_eq!(details[0].id, "castle");
    assert_eq!(details[1].id, "garden");
}

#[tokio::test]
async fn test_custom_base_key() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let service = VisitedLandmarkService::with_key(store.clone(), "kyoto_walk");
    assert_eq!(service.details_key(), "kyoto_walk_details");

    service
        .add_visited_with_details(stored("gate", "Rashomon"))
        .await
        .unwrap();

    assert!(store.get("kyoto_walk").await.unwrap().is_some());
    assert!(store.get("kyoto_walk_details").await.unwrap().is_some());
    assert!(store.get("visited_landmarks").await.unwrap().is_none());
    assert!(service.is_visited("gate").await.unwrap());
    assert!(!service.is_visited("bridge").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_adds_are_not_lost() {
    let service = Arc::new(VisitedLandmarkService::new(Arc::new(
        MemoryKeyValueStore::new(),
    )));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.add_visited(&format!("spot-{}", i)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(service.load_visited().await.unwrap().len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_detail_adds_insert_once() {
    let store = setup_sqlite_store().await;
    let service = Arc::new(VisitedLandmarkService::new(store));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .add_visited_with_details(stored("pagoda", "Yasaka Pagoda"))
                    .await
            })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().inserted {
            inserted += 1;
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(service.load_visited().await.unwrap().len(), 1);
    assert_eq!(service.load_details().await.unwrap().len(), 1);
}
