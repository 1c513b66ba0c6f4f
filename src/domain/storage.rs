//! Key-value storage contract
//!
//! Visited state is persisted as JSON strings under fixed keys. The store is
//! injected so the same service runs against SQLite in the binary and an
//! in-memory map in tests.

use async_trait::async_trait;

use super::DomainError;

/// Minimal string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
