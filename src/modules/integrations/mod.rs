//! Third-party services consumed by the server

pub mod local_search;
pub mod quest_api;
