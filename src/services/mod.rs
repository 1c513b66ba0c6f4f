//! Services Layer
//!
//! Business logic over the injected storage, independent of the HTTP layer.

pub mod visited_service;

pub use visited_service::{VISITED_LANDMARKS_KEY, VisitedLandmarkService, VisitedSnapshot};
