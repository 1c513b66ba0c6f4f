//! Visited Landmark Service - persisted visited state over a KeyValueStore
//!
//! Two keys are maintained: the base key holds the JSON array of visited ids,
//! `<base>_details` holds the JSON array of stored landmark records. Writes to
//! the two keys are sequential, not transactional.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{DomainError, KeyValueStore, StoredLandmark};

pub const VISITED_LANDMARKS_KEY: &str = "visited_landmarks";

/// Snapshot returned after recording a visit with details
#[derive(Debug, Clone, Serialize)]
pub struct VisitedSnapshot {
    /// Whether this call added the id to the visited set
    pub inserted: bool,
    pub visited: BTreeSet<String>,
    pub landmarks: Vec<StoredLandmark>,
}

pub struct VisitedLandmarkService {
    store: Arc<dyn KeyValueStore>,
    key: String,
    details_key: String,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl VisitedLandmarkService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, VISITED_LANDMARKS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            details_key: format!("{}_details", key),
            write_lock: Mutex::new(()),
        }
    }

    pub fn details_key(&self) -> &str {
        &self.details_key
    }

    /// Load the visited id set. Unparseable data yields an empty set.
    pub async fn load_visited(&self) -> Result<BTreeSet<String>, DomainError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(BTreeSet::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                let visited: BTreeSet<String> = ids.into_iter().collect();
                tracing::debug!("Loaded {} visited landmarks from storage", visited.len());
                Ok(visited)
            }
            Err(e) => {
                tracing::warn!("Failed to parse visited landmarks under '{}': {}", self.key, e);
                Ok(BTreeSet::new())
            }
        }
    }

    pub async fn save_visited(&self, visited: &BTreeSet<String>) -> Result<(), DomainError> {
        let json = serde_json::to_string(visited)?;
        self.store.set(&self.key, &json).await
    }

    /// Load the visited landmark records. Unparseable data yields an empty list.
    pub async fn load_details(&self) -> Result<Vec<StoredLandmark>, DomainError> {
        let Some(raw) = self.store.get(&self.details_key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<StoredLandmark>>(&raw) {
            Ok(landmarks) => Ok(landmarks),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse visited landmark details under '{}': {}",
                    self.details_key,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    pub async fn save_details(&self, landmarks: &[StoredLandmark]) -> Result<(), DomainError> {
        let json = serde_json::to_string(landmarks)?;
        self.store.set(&self.details_key, &json).await
    }

    pub async fn is_visited(&self, landmark_id: &str) -> Result<bool, DomainError> {
        Ok(self.load_visited().await?.contains(landmark_id))
    }

    /// Mark `landmark_id` as visited and return the updated set.
    pub async fn add_visited(&self, landmark_id: &str) -> Result<BTreeSet<String>, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut visited = self.load_visited().await?;
        if visited.insert(landmark_id.to_string()) {
            tracing::info!("Landmark {} marked as visited", landmark_id);
        }
        self.save_visited(&visited).await?;
        Ok(visited)
    }

    /// Mark a landmark as visited and upsert its record by id.
    pub async fn add_visited_with_details(
        &self,
        landmark: StoredLandmark,
    ) -> Result<VisitedSnapshot, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut visited = self.load_visited().await?;
        let inserted = visited.insert(landmark.id.clone());
        if inserted {
            tracing::info!("Landmark {} ({}) marked as visited", landmark.id, landmark.name);
        }
        self.save_visited(&visited).await?;

        let mut landmarks = self.load_details().await?;
        match landmarks.iter_mut().find(|l| l.id == landmark.id) {
            Some(existing) => *existing = landmark,
            None => landmarks.push(landmark),
        }
        self.save_details(&landmarks).await?;

        Ok(VisitedSnapshot {
            inserted,
            visited,
            landmarks,
        })
    }
}
