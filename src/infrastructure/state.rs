//! Application state containing services and shared resources

use std::sync::Arc;

use crate::domain::{DomainError, KeyValueStore};
use crate::infrastructure::config::Config;
use crate::infrastructure::http_client::HttpClient;
use crate::modules::integrations::quest_api::QuestClient;
use crate::services::VisitedLandmarkService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Outbound client used by every integration
    pub http: HttpClient,
    /// Visited landmark persistence
    pub visited: Arc<VisitedLandmarkService>,
    /// Quest backend client, absent when no backend URL is configured
    pub quests: Option<QuestClient>,
}

impl AppState {
    /// Create a new AppState over the given key-value store
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, DomainError> {
        let http = HttpClient::new(config.http_policy.clone())?;
        let visited = Arc::new(VisitedLandmarkService::with_key(
            store,
            &config.visited_storage_key,
        ));
        let quests = config
            .backend_url
            .as_deref()
            .map(|url| QuestClient::new(url, http.clone()));

        if config.local_search_api_key.is_none() {
            tracing::warn!("Local search API key is not configured; search requests will fail");
        }

        Ok(Self {
            config: Arc::new(config),
            http,
            visited,
            quests,
        })
    }
}
