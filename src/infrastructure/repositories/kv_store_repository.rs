//! SeaORM implementation of KeyValueStore

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::domain::{DomainError, KeyValueStore};
use crate::models::kv_entry::{ActiveModel, Column, Entity as KvEntry};

/// SQLite-backed key-value store, one row per key
pub struct SeaOrmKeyValueStore {
    db: DatabaseConnection,
}

impl SeaOrmKeyValueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SeaOrmKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let entry = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let entry = ActiveModel {
            storage_key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        KvEntry::insert(entry)
            .on_conflict(
                OnConflict::column(Column::StorageKey)
                    .update_columns([Column::Value, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}
