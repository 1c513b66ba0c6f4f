//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Landmark and geofence logic, the storage contract and domain error types.

pub mod errors;
pub mod geofence;
pub mod landmark;
pub mod storage;

pub use errors::DomainError;
pub use geofence::LatLng;
pub use landmark::{InfoWindowPolicy, Landmark, StoredLandmark};
pub use storage::KeyValueStore;
