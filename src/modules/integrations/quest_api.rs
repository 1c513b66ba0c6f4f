//! Client for the remote quest backend (`/quest` CRUD resource)
//!
//! Every failure collapses into one generic error per operation. The status
//! code, transport error or decoding problem is logged but not surfaced.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClient;

/// Quest record owned by the backend: an id plus whatever fields it returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Quest body without id, used for create and partial update
pub type QuestFields = Map<String, Value>;

#[derive(Clone)]
pub struct QuestClient {
    base_url: String,
    http: HttpClient,
}

impl QuestClient {
    pub fn new(base_url: &str, http: HttpClient) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/quest", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/quest/{}", self.base_url, id)
    }

    pub async fn get_quests(&self) -> Result<Vec<Quest>, DomainError> {
        const FAILURE: &str = "Failed to fetch quests";
        let url = self.collection_url();

        let res = self
            .http
            .send(|client| client.get(&url))
            .await
            .map_err(|e| failure(FAILURE, e))?;
        if !res.status().is_success() {
            return Err(failure(FAILURE, res.status()));
        }
        res.json().await.map_err(|e| failure(FAILURE, e))
    }

    pub async fn create_quest(&self, quest: &QuestFields) -> Result<Quest, DomainError> {
        const FAILURE: &str = "Failed to create quest";
        let url = self.collection_url();

        let res = self
            .http
            .send(|client| client.post(&url).json(quest))
            .await
            .map_err(|e| failure(FAILURE, e))?;
        if !res.status().is_success() {
            return Err(failure(FAILURE, res.status()));
        }
        res.json().await.map_err(|e| failure(FAILURE, e))
    }

    pub async fn update_quest(&self, id: i64, quest: &QuestFields) -> Result<Quest, DomainError> {
        const FAILURE: &str = "Failed to update quest";
        let url = self.item_url(id);

        let res = self
            .http
            .send(|client| client.put(&url).json(quest))
            .await
            .map_err(|e| failure(FAILURE, e))?;
        if !res.status().is_success() {
            return Err(failure(FAILURE, res.status()));
        }
        res.json().await.map_err(|e| failure(FAILURE, e))
    }

    pub async fn delete_quest(&self, id: i64) -> Result<(), DomainError> {
        const FAILURE: &str = "Failed to delete quest";
        let url = self.item_url(id);

        let res = self
            .http
            .send(|client| client.delete(&url))
            .await
            .map_err(|e| failure(FAILURE, e))?;
        if !res.status().is_success() {
            return Err(failure(FAILURE, res.status()));
        }
        Ok(())
    }
}

fn failure(message: &str, cause: impl std::fmt::Display) -> DomainError {
    tracing::warn!("{}: {}", message, cause);
    DomainError::External(message.to_string())
}
